//! Field validation for trellis.
//!
//! Three layers, each usable on its own:
//!
//! - [`rules`]: pure checks over a string, and [`Validator`], an ordered list
//!   of them that stops at the first failure.
//! - [`ValidatedField`]: a value plus validator with stored result and the
//!   "re-validate on edit once an error was shown" behavior.
//! - [`Form`]: validates many fields at once and reports the first failure.
//!
//! Messages come from an injected [`Translate`] implementation.
//!
//! # Example
//!
//! ```ignore
//! use trellis::validation::{Form, ValidatedField, Validator, FieldConfig};
//!
//! let password = ValidatedField::with_config(
//!     Validator::english().password(PasswordPolicy::default()),
//!     &FieldConfig::new(),
//! );
//! let live = password.clone();
//! let confirm = ValidatedField::new(Validator::english().matches_with(move || live.value()));
//!
//! let form = Form::new();
//! let _password = form.add_field(&password, "password");
//! let _confirm = form.add_field(&confirm, "confirm");
//!
//! if form.validate().is_valid() {
//!     // Proceed with form submission
//! }
//! ```

pub mod config;
mod error_display;
mod field;
mod form;
mod result;
pub mod rules;
mod translate;
mod validatable;
mod validator;

pub use config::{FieldConfig, PasswordPolicy};
pub use error_display::ErrorDisplay;
pub use field::{ValidatedField, ValidatedFieldId};
pub use form::{FieldHandle, FieldId, Form};
pub use result::{FieldError, ValidationResult};
pub use rules::{Rule, Violation};
pub use translate::{EnglishMessages, MessageCatalog, MessageKey, Param, Translate, interpolate};
pub use validatable::Validatable;
pub use validator::{Validator, validate};
