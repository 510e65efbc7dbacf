//! URL handling: normalization/minimization, domain extraction, and the
//! validity filter that gates what may enter the frontier.

mod domain;
mod normalize;
mod validity;

pub use domain::extract_domain;
pub use normalize::{minimize, normalize};
pub use validity::{is_valid, is_whitelisted_second_label, second_label, BLACKLISTED_SUFFIXES};
