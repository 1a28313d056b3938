//! Компилятор GraphDSL: лексер и парсер.
//!
//! # Синтаксис
//!
//! ```text
//! (42)                          # узел со значением
//! ('A', {color: 'red'})         # узел со свойствами
//! ()                            # пустой узел
//! a = (1)                       # связывание имени (или a := (1))
//! a                             # ссылка на имя
//! (1) -{len: 2}> (2)            # ориентированное ребро
//! (1) <{}- (2)                  # ребро справа налево
//! (1) -{}- (2)                  # неориентированное ребро
//! (1) -{}> (2) -{}> (3)         # цепочка рёбер
//! (v, {weight: w})              # v и w: внешние параметры
//! ```
//!
//! # Пример
//!
//! ```
//! use graphdsl::config::CompileOptions;
//! use graphdsl::parser::compile;
//!
//! let def = compile("a = (1)\na -{}> (2)", &CompileOptions::default()).unwrap();
//! assert_eq!(def.len(), 2);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod stream;
pub mod token;

pub use error::{ErrorKind, ParseError};
pub use lexer::{tokenize, Lexer, HOST_PREAMBLE_LINES};
pub use parser::Parser;
pub use stream::TokenStream;
pub use token::{Span, Spanned, Token, TokenKind};

use crate::ast::GraphDef;
use crate::config::CompileOptions;

/// Скомпилировать исходный текст в [`GraphDef`].
///
/// Компиляция является чистой функцией текста и `options`: одинаковый вход всегда
/// даёт структурно равные деревья.
pub fn compile(source: &str, options: &CompileOptions) -> Result<GraphDef, ParseError> {
    let tokens = tokenize(source, options.preamble_lines)?;

    if options.debug_tokens {
        for token in &tokens {
            log::debug!("{:>5}..{:<5} {:?}", token.span.start, token.span.end, token.value);
        }
    }

    let def = Parser::new(tokens, options).parse_graph()?;
    log::trace!("compiled {} top-level statements", def.len());
    Ok(def)
}
