//! Named knot invariants behind a memoizing, cancellable scheduler.
//!
//! ```
//! use knotlab_inv::{Diagram, Scheduler};
//! use knotlab_link::Pd;
//!
//! let s = Scheduler::default();
//! let d = Diagram::from_pd(Pd::figure8());
//! let det = s.get_invariant("determinant", &d, &[]).unwrap();
//! assert_eq!(det.as_int(), Some(5));
//! ```

mod error;
mod value;
mod diagram;
mod table;
mod scheduler;
mod handlers;

pub use error::*;
pub use value::*;
pub use diagram::*;
pub use table::*;
pub use scheduler::*;
pub use handlers::register_defaults;
