//! Typed publish/subscribe register driving the layout phases.
//!
//! Components declare the message kinds they handle; the bus delivers each
//! message to its subscribers in registration order. Messages posted while a
//! message is being delivered are queued and delivered right after it.

use crate::context::PassContext;
use crate::data_types::{AxisSnapshot, ErasedOperation, ExtentReport};
use crate::element::DrawableHandle;
use crate::error::ChartError;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub enum Message {
    InitializeAxes,
    Layout,
    LayoutComplete,
    DataSourceOperation {
        source: String,
        operation: ErasedOperation,
    },
    RenderComponents,
    FinalizeAxes,
    RenderAxes,
    RenderTransforms,
    /// An axis broadcasting its current extents.
    AxisExtents(AxisSnapshot),
    /// A series reporting the data range it needs on an axis.
    DataExtent(ExtentReport),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    InitializeAxes,
    Layout,
    LayoutComplete,
    DataSourceOperation,
    RenderComponents,
    FinalizeAxes,
    RenderAxes,
    RenderTransforms,
    AxisExtents,
    DataExtent,
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::InitializeAxes => MessageKind::InitializeAxes,
            Message::Layout => MessageKind::Layout,
            Message::LayoutComplete => MessageKind::LayoutComplete,
            Message::DataSourceOperation { .. } => MessageKind::DataSourceOperation,
            Message::RenderComponents => MessageKind::RenderComponents,
            Message::FinalizeAxes => MessageKind::FinalizeAxes,
            Message::RenderAxes => MessageKind::RenderAxes,
            Message::RenderTransforms => MessageKind::RenderTransforms,
            Message::AxisExtents(_) => MessageKind::AxisExtents,
            Message::DataExtent(_) => MessageKind::DataExtent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentRole {
    Axis,
    Series,
    Decoration,
}

/// A chart participant driven by bus messages.
pub trait Component {
    /// Unique name; other components refer to this one by it.
    fn name(&self) -> &str;

    fn role(&self) -> ComponentRole;

    /// Message kinds this component handles.
    fn subscriptions(&self) -> &[MessageKind];

    fn handle(&mut self, message: &Message, ctx: &mut PassContext<'_>);

    /// Name of the data source this component consumes, if any.
    fn data_source(&self) -> Option<&str> {
        None
    }

    /// Drawables currently owned by the component, removed when it is detached.
    fn elements(&self) -> Vec<DrawableHandle> {
        Vec::new()
    }
}

#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn Component>>,
    routes: HashMap<MessageKind, Vec<usize>>,
    dispatching: Option<MessageKind>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, component: Box<dyn Component>) -> Result<(), ChartError> {
        if self.position(component.name()).is_some() {
            return Err(ChartError::DuplicateComponent(component.name().to_string()));
        }
        let slot = self.subscribers.len();
        for kind in component.subscriptions() {
            let route = self.routes.entry(*kind).or_default();
            if !route.contains(&slot) {
                route.push(slot);
            }
        }
        tracing::debug!(component = component.name(), "registered");
        self.subscribers.push(component);
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Component>> {
        let slot = self.position(name)?;
        let component = self.subscribers.remove(slot);
        self.rebuild_routes();
        Some(component)
    }

    fn rebuild_routes(&mut self) {
        self.routes.clear();
        for (slot, component) in self.subscribers.iter().enumerate() {
            for kind in component.subscriptions() {
                let route = self.routes.entry(*kind).or_default();
                if !route.contains(&slot) {
                    route.push(slot);
                }
            }
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.subscribers.iter().position(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn component(&self, name: &str) -> Option<&dyn Component> {
        self.position(name).map(|slot| self.subscribers[slot].as_ref())
    }

    pub fn components(&self) -> impl Iterator<Item = &dyn Component> {
        self.subscribers.iter().map(|c| c.as_ref())
    }

    /// Names of the subscribers of `kind`, in delivery order.
    pub fn subscribers_of(&self, kind: MessageKind) -> Vec<&str> {
        self.routes
            .get(&kind)
            .map(|slots| slots.iter().map(|&s| self.subscribers[s].name()).collect())
            .unwrap_or_default()
    }

    pub fn dispatching(&self) -> Option<MessageKind> {
        self.dispatching
    }

    /// Delivers `message`, then everything posted while delivering it.
    ///
    /// Components never see the bus: `PassContext::post` is their only way to
    /// send a follow-up, so `ReentrantDispatch` is not reachable from a
    /// `Component`. The check only keeps `publish` from nesting if a future
    /// caller gains access to the bus during a delivery.
    pub fn publish(&mut self, message: Message, ctx: &mut PassContext<'_>) -> Result<(), ChartError> {
        if let Some(current) = self.dispatching {
            return Err(ChartError::ReentrantDispatch(message.kind(), current));
        }
        ctx.post(message);
        while let Some(next) = ctx.next_posted() {
            self.deliver(&next, ctx);
        }
        Ok(())
    }

    fn deliver(&mut self, message: &Message, ctx: &mut PassContext<'_>) {
        let kind = message.kind();
        ctx.record(message);
        let Some(slots) = self.routes.get(&kind).cloned() else {
            return;
        };
        self.dispatching = Some(kind);
        for slot in slots {
            let component = &mut self.subscribers[slot];
            tracing::trace!(component = component.name(), ?kind, "deliver");
            component.handle(message, ctx);
        }
        self.dispatching = None;
    }
}
