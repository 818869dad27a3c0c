pub mod corpus;
pub mod form;
pub mod outcome;
pub mod section;
pub mod validate;

mod error;

pub use corpus::{CorpusRecord, LanguageMode};
pub use error::{Error, Result};
pub use form::{DeliveryForm, FormInput, PaymentForm};
pub use outcome::{ErrorClass, ErrorKind};
pub use section::{SectionKind, SectionProfile};
pub use validate::{
	DeliveryTermsValidator, PaymentTermsValidator, RepetitionDetector, Validator,
};
