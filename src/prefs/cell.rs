use crate::prefs::codec::Codec;
use crate::prefs::db::PrefDb;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, ThreadId};

/// A named, typed preference backed by one row in the prefs table.
///
/// Reads are lazy: the first `get` pulls the raw string from SQLite and
/// decodes it; everything after that is served from memory. Writes go to
/// memory first, then to disk, then to subscribers, in that order. A write
/// whose durable half fails still sticks in memory for the session.
/// Competing writers serialize on the cell lock, and notification rounds
/// are delivered in the order the writes landed.
pub struct PrefCell<C: Codec> {
    inner: Arc<CellInner<C>>,
}

struct CellInner<C: Codec> {
    name: String,
    codec: C,
    default: C::Value,
    db: PrefDb,
    state: Mutex<CellState<C::Value>>,
}

struct CellState<V> {
    value: Option<V>,
    subscribers: Vec<Subscriber<V>>,
    pending: VecDeque<V>,
    draining_on: Option<ThreadId>,
    next_sub_id: u64,
}

struct Subscriber<V> {
    id: u64,
    callback: Arc<dyn Fn(&V) + Send + Sync>,
}

/// Handle returned by [`PrefCell::subscribe`]. The callback stays registered
/// until `unsubscribe` is called; dropping the handle changes nothing.
pub struct PrefSubscription {
    cancel: Box<dyn FnOnce() + Send>,
}

impl PrefSubscription {
    pub fn unsubscribe(self) {
        (self.cancel)();
    }
}

impl<C: Codec> Clone for PrefCell<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Codec + 'static> PrefCell<C> {
    pub(crate) fn new(db: PrefDb, name: &str, codec: C, default: C::Value) -> Self {
        Self {
            inner: Arc::new(CellInner {
                name: name.to_string(),
                codec,
                default,
                db,
                state: Mutex::new(CellState {
                    value: None,
                    subscribers: Vec::new(),
                    pending: VecDeque::new(),
                    draining_on: None,
                    next_sub_id: 0,
                }),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Current effective value: the last value set this session, else the
    /// decoded stored value, else the default. Falling back to the default
    /// does not write anything.
    pub fn get(&self) -> C::Value {
        let mut state = self.lock_state();
        if let Some(value) = &state.value {
            return value.clone();
        }
        let value = self.load_or_default();
        state.value = Some(value.clone());
        value
    }

    /// Replaces the value. Memory is updated unconditionally; a failed
    /// encode or row write is reported on stderr and the session keeps the
    /// new value. Subscribers run after the persist attempt finishes.
    pub fn set(&self, value: C::Value) {
        let mut state = self.lock_state();
        state.value = Some(value.clone());
        self.persist(&value);
        self.enqueue(&mut state, value);
        drop(state);
        self.drain();
    }

    /// Read-modify-write in one step: the closure sees the current effective
    /// value under the cell lock, so writers on other threads cannot slip in
    /// between the read and the write. It returns whether it changed the
    /// value; on `false` nothing is persisted or announced. The closure must
    /// not call back into this cell.
    pub fn update(&self, apply: impl FnOnce(&mut C::Value) -> bool) {
        let mut state = self.lock_state();
        let mut value = match state.value.take() {
            Some(value) => value,
            None => self.load_or_default(),
        };
        if !apply(&mut value) {
            state.value = Some(value);
            return;
        }
        self.persist(&value);
        state.value = Some(value.clone());
        self.enqueue(&mut state, value);
        drop(state);
        self.drain();
    }

    /// Resets the cell to its default and deletes the stored row.
    pub fn clear(&self) {
        let mut state = self.lock_state();
        let value = self.inner.default.clone();
        state.value = Some(value.clone());
        if let Err(e) = self.inner.db.delete(&self.inner.name) {
            eprintln!("⚠️ pref '{}' not cleared on disk: {e}", self.name());
        }
        self.enqueue(&mut state, value);
        drop(state);
        self.drain();
    }

    /// Registers a callback invoked with the new effective value after every
    /// `set`, `update` or `clear` on this cell.
    pub fn subscribe(&self, callback: impl Fn(&C::Value) + Send + Sync + 'static) -> PrefSubscription {
        let id = {
            let mut state = self.lock_state();
            let id = state.next_sub_id;
            state.next_sub_id += 1;
            state.subscribers.push(Subscriber {
                id,
                callback: Arc::new(callback),
            });
            id
        };
        let weak = Arc::downgrade(&self.inner);
        PrefSubscription {
            cancel: Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let mut state = inner.state.lock().unwrap_or_else(|p| p.into_inner());
                    state.subscribers.retain(|s| s.id != id);
                }
            }),
        }
    }

    fn persist(&self, value: &C::Value) {
        match self.inner.codec.encode(value) {
            Ok(raw) => {
                if let Err(e) = self.inner.db.write(&self.inner.name, &raw) {
                    eprintln!("⚠️ pref '{}' not persisted: {e}", self.name());
                }
            }
            Err(e) => {
                eprintln!("⚠️ pref '{}' not persisted: {e}", self.name());
            }
        }
    }

    /// Queues one delivery round. A write issued from inside one of this
    /// cell's own callbacks still applies and persists, but its round is
    /// dropped to keep the chain finite.
    fn enqueue(&self, state: &mut CellState<C::Value>, value: C::Value) {
        if state.draining_on == Some(thread::current().id()) {
            eprintln!(
                "⚠️ pref '{}' changed from inside its own notification, subscribers not re-run",
                self.name()
            );
            return;
        }
        state.pending.push_back(value);
    }

    /// Delivers queued rounds outside the state lock so a callback may call
    /// `get` on this cell or touch other cells. Whichever thread finds no
    /// delivery in progress drains the whole queue, so rounds leave in the
    /// order their writes landed.
    fn drain(&self) {
        {
            let mut state = self.lock_state();
            if state.draining_on.is_some() {
                return;
            }
            state.draining_on = Some(thread::current().id());
        }
        loop {
            let (value, callbacks) = {
                let mut state = self.lock_state();
                match state.pending.pop_front() {
                    Some(value) => {
                        let callbacks: Vec<Arc<dyn Fn(&C::Value) + Send + Sync>> =
                            state.subscribers.iter().map(|s| s.callback.clone()).collect();
                        (value, callbacks)
                    }
                    None => {
                        state.draining_on = None;
                        return;
                    }
                }
            };
            for callback in &callbacks {
                callback(&value);
            }
        }
    }

    fn load_or_default(&self) -> C::Value {
        match self.inner.db.read(&self.inner.name) {
            Ok(Some(raw)) => match self.inner.codec.decode(&raw) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("⚠️ pref '{}' unreadable, using default: {e}", self.name());
                    self.inner.default.clone()
                }
            },
            Ok(None) => self.inner.default.clone(),
            Err(e) => {
                eprintln!("⚠️ pref '{}' unreadable, using default: {e}", self.name());
                self.inner.default.clone()
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CellState<C::Value>> {
        self.inner.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}
