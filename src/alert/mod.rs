/// Risk severity vocabulary shared by every caller of the scorer.
///
/// Submodules:
/// - `bands`    — score → severity band (label, badge variant, map colour)
/// - `advisory` — score → recommended action text

pub mod advisory;
pub mod bands;

pub use advisory::{Advisory, advisory};
pub use bands::{RiskBand, band};
