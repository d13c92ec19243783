pub mod resolver;
pub mod signs;

pub use resolver::{resolve_sign, SignPosition, SIGN_SPAN};
pub use signs::{Element, Modality, ZodiacSign};
