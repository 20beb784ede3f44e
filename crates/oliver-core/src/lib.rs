pub mod boolean;
pub mod error;
pub mod expr;
pub mod number;
pub mod opcode;
pub mod value;

pub use boolean::Boolean;
pub use error::{OliverError, Span};
pub use expr::Expr;
pub use lasso::Spur;
pub use number::Number;
pub use opcode::{Band, OpCode};
pub use value::{compare_spurs, intern, resolve, with_resolved, Lambda, ScopeMap, Value};
