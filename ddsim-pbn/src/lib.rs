//! PBN deal strings.
//!
//! Only the `Deal` tag payload is handled here (`N:AKQ.. ... ... ...`), which
//! is the form written to the output stream and handed to the solver.

mod deal;

pub use deal::{format_deal, format_hand, parse_deal, ParseError};
