//! Brazilian identifier validation and input masking
//!
//! Pure, stateless helpers for CPF, CNPJ, phone numbers and e-mail
//! addresses. Masks are safe to call on every keystroke; validators are
//! total and answer `false` instead of failing. [`models`] wraps both in
//! validated value objects for code that wants types instead of strings.

pub mod email;
pub mod error;
pub mod format;
pub mod models;
pub mod validation;

pub use email::{is_valid_email, normalize_email};
pub use error::DocumentError;
pub use format::{mask_cnpj, mask_cpf, mask_cpf_cnpj, mask_phone, normalize, unmask};
pub use models::{Cnpj, Cpf, Email, Phone, PhoneKind, TaxId};
pub use validation::{
    is_valid_cnpj, is_valid_cnpj_strict, is_valid_cpf, is_valid_cpf_cnpj, is_valid_cpf_cnpj_with,
    CnpjCheck, DocumentKind,
};
