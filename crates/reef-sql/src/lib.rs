mod expression;
mod lexer;
mod parser;
mod statement;
mod value;

pub use expression::{Comparison, Expression};
pub use lexer::{Keyword, Lexer, ParseError, Token};
pub use parser::{Parser, parse};
pub use statement::{CollectionRef, Projection, Sort, SortDirection, Statement};
pub use value::{Kind, Value};
