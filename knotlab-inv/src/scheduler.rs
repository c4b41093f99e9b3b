use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};
use ahash::AHashMap;
use itertools::Itertools;
use log::{debug, info};

use crate::diagram::{Diagram, DiagramData, DiagramId};
use crate::error::InvariantError;
use crate::table::KnotTable;
use crate::value::Value;

pub type Outcome = Result<Rc<Value>, InvariantError>;
pub type Handler = fn(&Context<'_>, &Diagram, &[i64]) -> Result<Value, InvariantError>;

#[derive(Clone, Copy, Debug)]
pub struct SchedulerConfig {
    /// Number of folded entities between yield points.
    pub yield_every: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { yield_every: 8 }
    }
}

/// A shared flag checked at every yield point.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// A named positional argument, optional if it has a default.
#[derive(Clone, Copy, Debug)]
pub struct Param {
    pub name: &'static str,
    pub default: Option<i64>,
}

impl Param {
    pub const fn required(name: &'static str) -> Self {
        Self { name, default: None }
    }

    pub const fn optional(name: &'static str, default: i64) -> Self {
        Self { name, default: Some(default) }
    }
}

struct Registered {
    params: Vec<Param>,
    handler: Handler,
}

type Key = (String, DiagramId, Vec<i64>);

enum Entry {
    Running,
    Done(Outcome),
}

/// Memoizing dispatcher of named invariants.
///
/// A request is keyed by `(name, diagram identity, args)`. A key is
/// computed at most once: values and failures are cached, while a
/// cancelled computation leaves no entry and runs again on the next
/// request. Cached entries go away with their diagram, see [`Scheduler::purge`].
pub struct Scheduler {
    config: SchedulerConfig,
    handlers: AHashMap<String, Registered>,
    cache: RefCell<AHashMap<Key, Entry>>,
    diagrams: RefCell<AHashMap<DiagramId, Weak<DiagramData>>>,
    depth: Cell<usize>,
    yield_hook: Option<Box<dyn Fn()>>,
    table: Option<Box<dyn KnotTable>>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        assert!(config.yield_every > 0, "yield_every must be positive.");
        Self {
            config,
            handlers: AHashMap::new(),
            cache: RefCell::new(AHashMap::new()),
            diagrams: RefCell::new(AHashMap::new()),
            depth: Cell::new(0),
            yield_hook: None,
            table: None,
        }
    }

    /// A scheduler with all the built-in invariants registered.
    pub fn with_defaults(config: SchedulerConfig) -> Self {
        let mut s = Self::new(config);
        crate::handlers::register_defaults(&mut s);
        s
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn register(&mut self, name: &str, params: &[Param], handler: Handler) {
        let r = Registered { params: params.to_vec(), handler };
        if self.handlers.insert(name.to_string(), r).is_some() {
            debug!("handler `{name}` replaced.");
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).sorted().collect()
    }

    /// Called at every yield point, before the cancellation check.
    pub fn set_yield_hook<F>(&mut self, hook: F)
    where F: Fn() + 'static {
        self.yield_hook = Some(Box::new(hook))
    }

    pub fn set_table<T>(&mut self, table: T)
    where T: KnotTable + 'static {
        self.table = Some(Box::new(table))
    }

    pub fn table(&self) -> Option<&dyn KnotTable> {
        self.table.as_deref()
    }

    pub fn get_invariant(&self, name: &str, diagram: &Diagram, args: &[i64]) -> Outcome {
        self.get_invariant_with(name, diagram, args, &CancelToken::new())
    }

    pub fn get_invariant_with(&self, name: &str, diagram: &Diagram, args: &[i64], cancel: &CancelToken) -> Outcome {
        if self.depth.get() == 0 {
            self.purge();
        }
        self.run(name, diagram, args, cancel)
    }

    fn normalize_args(&self, name: &str, args: &[i64]) -> Result<(Handler, Vec<i64>), InvariantError> {
        let Some(r) = self.handlers.get(name) else {
            return Err(InvariantError::UnknownInvariant(name.to_string()))
        };
        if args.len() > r.params.len() {
            let msg = format!("{name} takes {} arguments, got {}.", r.params.len(), args.len());
            return Err(InvariantError::InvalidArgs(msg))
        }

        let mut full = args.to_vec();
        for p in &r.params[args.len()..] {
            match p.default {
                Some(a) => full.push(a),
                None => {
                    let msg = format!("{name} requires `{}`.", p.name);
                    return Err(InvariantError::InvalidArgs(msg))
                }
            }
        }

        Ok((r.handler, full))
    }

    fn run(&self, name: &str, diagram: &Diagram, args: &[i64], cancel: &CancelToken) -> Outcome {
        let (handler, args) = self.normalize_args(name, args)?;
        let key = (name.to_string(), diagram.id(), args);

        match self.cache.borrow().get(&key) {
            Some(Entry::Done(res)) => {
                debug!("hit {name}{:?} on {}", key.2, key.1);
                return res.clone()
            },
            Some(Entry::Running) => {
                let msg = format!("{name}{:?} on {}", key.2, key.1);
                return Err(InvariantError::Cyclic(msg))
            },
            None => ()
        }

        debug!("miss {name}{:?} on {}", key.2, key.1);

        self.diagrams.borrow_mut().entry(diagram.id()).or_insert_with(|| diagram.downgrade());
        self.cache.borrow_mut().insert(key.clone(), Entry::Running);

        let res = if cancel.is_cancelled() {
            Err(InvariantError::Cancelled)
        } else {
            let ctx = Context {
                scheduler: self,
                cancel,
                steps: Cell::new(0),
            };

            self.depth.set(self.depth.get() + 1);
            let res = catch_unwind(AssertUnwindSafe(|| handler(&ctx, diagram, &key.2)));
            self.depth.set(self.depth.get() - 1);

            match res {
                Ok(r) => r.map(Rc::new),
                Err(payload) => Err(InvariantError::Failed(panic_message(payload.as_ref())))
            }
        };

        // cancellations are cached like any other rejection.
        match &res {
            Ok(v) => info!("{name}{:?} on {}: {v}", key.2, key.1),
            Err(InvariantError::Cancelled) => debug!("cancelled {name}{:?} on {}", key.2, key.1),
            Err(e) => info!("{name}{:?} on {}: {e}", key.2, key.1),
        }
        self.cache.borrow_mut().insert(key, Entry::Done(res.clone()));

        res
    }

    /// Drops the cached results of diagrams that are no longer alive.
    pub fn purge(&self) {
        let dead = {
            let mut diagrams = self.diagrams.borrow_mut();
            let dead = diagrams.iter().filter(|(_, w)| w.strong_count() == 0).map(|(&id, _)| id).collect_vec();
            for id in dead.iter() {
                diagrams.remove(id);
            }
            dead
        };

        if dead.is_empty() {
            return
        }

        let mut cache = self.cache.borrow_mut();
        let before = cache.len();
        cache.retain(|(_, id, _), _| !dead.contains(id));
        debug!("purged {} entries of {} diagrams.", before - cache.len(), dead.len());
    }

    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
        self.diagrams.borrow_mut().clear();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::with_defaults(SchedulerConfig::default())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}

/// What a running handler sees of the scheduler.
pub struct Context<'a> {
    scheduler: &'a Scheduler,
    cancel: &'a CancelToken,
    steps: Cell<usize>,
}

impl<'a> Context<'a> {
    /// Counts one unit of work. Every `yield_every` units, hands control
    /// to the yield hook and then fails if the request was cancelled.
    pub fn checkpoint(&self) -> Result<(), InvariantError> {
        let n = self.steps.get() + 1;
        self.steps.set(n);

        if n % self.scheduler.config.yield_every == 0 {
            if let Some(hook) = &self.scheduler.yield_hook {
                hook();
            }
            if self.cancel.is_cancelled() {
                return Err(InvariantError::Cancelled)
            }
        }
        Ok(())
    }

    /// [`Context::checkpoint`] as a step callback for the folding routines.
    pub fn step(&self) -> impl FnMut(usize) -> Result<(), InvariantError> + '_ {
        move |_| self.checkpoint()
    }

    /// Requests another invariant under the same cancellation.
    pub fn request(&self, name: &str, diagram: &Diagram, args: &[i64]) -> Outcome {
        self.scheduler.run(name, diagram, args, self.cancel)
    }

    pub fn table(&self) -> Option<&dyn KnotTable> {
        self.scheduler.table()
    }
}

#[cfg(test)]
mod tests {
    use knotlab_link::Pd;
    use super::*;

    fn counting(ctx: &Context<'_>, _: &Diagram, args: &[i64]) -> Result<Value, InvariantError> {
        for _ in 0..args[0] {
            ctx.checkpoint()?;
        }
        Ok(Value::Int(args[0]))
    }

    fn looping(ctx: &Context<'_>, d: &Diagram, _: &[i64]) -> Result<Value, InvariantError> {
        let v = ctx.request("looping", d, &[])?;
        Ok(v.as_ref().clone())
    }

    fn scheduler() -> Scheduler {
        let mut s = Scheduler::new(SchedulerConfig { yield_every: 2 });
        s.register("count", &[Param::optional("n", 3)], counting);
        s.register("looping", &[], looping);
        s
    }

    #[test]
    fn defaults_share_key() {
        let s = scheduler();
        let d = Diagram::from_pd(Pd::unknot());
        let a = s.get_invariant("count", &d, &[]).unwrap();
        let b = s.get_invariant("count", &d, &[3]).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(s.cache_len(), 1);
    }

    #[test]
    fn args() {
        let s = scheduler();
        let d = Diagram::from_pd(Pd::unknot());
        assert!(matches!(s.get_invariant("count", &d, &[1, 2]), Err(InvariantError::InvalidArgs(_))));
        assert!(matches!(s.get_invariant("nope", &d, &[]), Err(InvariantError::UnknownInvariant(_))));
    }

    #[test]
    fn cyclic() {
        let s = scheduler();
        let d = Diagram::from_pd(Pd::unknot());
        assert!(matches!(s.get_invariant("looping", &d, &[]), Err(InvariantError::Cyclic(_))));
    }

    #[test]
    fn cancel_cached() {
        let s = scheduler();
        let d = Diagram::from_pd(Pd::unknot());
        let c = CancelToken::new();
        c.cancel();
        assert_eq!(s.get_invariant_with("count", &d, &[4], &c), Err(InvariantError::Cancelled));
        assert_eq!(s.cache_len(), 1);

        // not retried, even with a live token.
        assert_eq!(s.get_invariant("count", &d, &[4]), Err(InvariantError::Cancelled));
        assert_eq!(s.cache_len(), 1);

        // a copy is a new identity.
        let v = s.get_invariant("count", &d.copy(), &[4]).unwrap();
        assert_eq!(v.as_int(), Some(4));
    }

    #[test]
    fn yield_hook() {
        let mut s = scheduler();
        let n = Rc::new(Cell::new(0));
        let m = n.clone();
        s.set_yield_hook(move || m.set(m.get() + 1));

        let d = Diagram::from_pd(Pd::unknot());
        s.get_invariant("count", &d, &[5]).unwrap();
        assert_eq!(n.get(), 2);
    }

    #[test]
    fn purge() {
        let s = scheduler();
        let d = Diagram::from_pd(Pd::unknot());
        s.get_invariant("count", &d, &[]).unwrap();
        assert_eq!(s.cache_len(), 1);

        drop(d);
        s.purge();
        assert_eq!(s.cache_len(), 0);
    }

    #[test]
    fn panics() {
        let mut s = Scheduler::new(SchedulerConfig::default());
        s.register("boom", &[], |_, _, _| panic!("boom"));
        let d = Diagram::from_pd(Pd::unknot());
        assert_eq!(s.get_invariant("boom", &d, &[]), Err(InvariantError::Failed("boom".into())));
        assert_eq!(s.cache_len(), 1);
    }
}
