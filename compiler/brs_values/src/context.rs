//! Host-provided runtime state.
//!
//! One `RuntimeContext` is built by the host before the interpreter and
//! shared as `Rc<RuntimeContext>` with every object that needs host state.
//! It holds the registry store and the remote-control input source.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};

/// A remote-control key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub key: i32,
}

impl InputEvent {
    /// Release events are reported as `key + 100`.
    pub const RELEASE_OFFSET: i32 = 100;

    pub fn new(key: i32) -> Self {
        InputEvent { key }
    }

    pub fn is_press(self) -> bool {
        self.key < Self::RELEASE_OFFSET
    }
}

/// Source of input events.
pub trait InputSource {
    /// Block until an event arrives or `timeout` elapses. `None` waits
    /// until the source is closed.
    fn wait(&mut self, timeout: Option<Duration>) -> Option<InputEvent>;

    /// Next pending event without blocking.
    fn try_next(&mut self) -> Option<InputEvent>;
}

/// A source that never produces events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn wait(&mut self, _timeout: Option<Duration>) -> Option<InputEvent> {
        None
    }

    fn try_next(&mut self) -> Option<InputEvent> {
        None
    }
}

/// Input fed through a crossbeam channel, usually from a host thread.
pub struct ChannelInputSource {
    receiver: Receiver<InputEvent>,
}

impl ChannelInputSource {
    pub fn new(receiver: Receiver<InputEvent>) -> Self {
        ChannelInputSource { receiver }
    }

    /// A source plus the sender the host pushes events into.
    pub fn channel() -> (Sender<InputEvent>, ChannelInputSource) {
        let (sender, receiver) = channel::unbounded();
        (sender, ChannelInputSource::new(receiver))
    }
}

impl InputSource for ChannelInputSource {
    fn wait(&mut self, timeout: Option<Duration>) -> Option<InputEvent> {
        match timeout {
            Some(timeout) => match self.receiver.recv_timeout(timeout) {
                Ok(event) => Some(event),
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
            },
            None => self.receiver.recv().ok(),
        }
    }

    fn try_next(&mut self) -> Option<InputEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

type Registry = BTreeMap<String, BTreeMap<String, String>>;

pub struct RuntimeContext {
    registry: RefCell<Registry>,
    input: RefCell<Box<dyn InputSource>>,
    shut_down: Cell<bool>,
}

impl RuntimeContext {
    pub fn builder() -> RuntimeContextBuilder {
        RuntimeContextBuilder::default()
    }

    /// Mark the context torn down. Later input waits return nothing
    /// immediately.
    pub fn shutdown(&self) {
        tracing::debug!("runtime context shut down");
        self.shut_down.set(true);
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.get()
    }

    pub fn wait_input(&self, timeout: Option<Duration>) -> Option<InputEvent> {
        if self.is_shut_down() {
            return None;
        }
        self.input.borrow_mut().wait(timeout)
    }

    pub fn poll_input(&self) -> Option<InputEvent> {
        if self.is_shut_down() {
            return None;
        }
        self.input.borrow_mut().try_next()
    }

    pub fn registry_read(&self, section: &str, key: &str) -> Option<String> {
        self.registry.borrow().get(section)?.get(key).cloned()
    }

    pub fn registry_write(&self, section: &str, key: &str, value: &str) {
        self.registry
            .borrow_mut()
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Returns whether the key existed.
    pub fn registry_delete(&self, section: &str, key: &str) -> bool {
        self.registry
            .borrow_mut()
            .get_mut(section)
            .is_some_and(|entries| entries.remove(key).is_some())
    }

    pub fn registry_keys(&self, section: &str) -> Vec<String> {
        self.registry
            .borrow()
            .get(section)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Copy of the whole store, for hosts that persist it.
    pub fn registry_snapshot(&self) -> Registry {
        self.registry.borrow().clone()
    }
}

impl fmt::Debug for RuntimeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeContext")
            .field("sections", &self.registry.borrow().len())
            .field("shut_down", &self.shut_down.get())
            .finish_non_exhaustive()
    }
}

/// Builder for [`RuntimeContext`].
#[derive(Default)]
pub struct RuntimeContextBuilder {
    input: Option<Box<dyn InputSource>>,
    registry: Registry,
}

impl RuntimeContextBuilder {
    #[must_use]
    pub fn input_source(mut self, source: Box<dyn InputSource>) -> Self {
        self.input = Some(source);
        self
    }

    /// Seed the registry store.
    #[must_use]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> RuntimeContext {
        RuntimeContext {
            registry: RefCell::new(self.registry),
            input: RefCell::new(self.input.unwrap_or_else(|| Box::new(NoInput))),
            shut_down: Cell::new(false),
        }
    }
}
