// Digit normalization and display masks for Brazilian identifiers
pub mod digits;
pub mod mask;

pub use digits::{normalize, unmask};
pub use mask::{mask_cnpj, mask_cpf, mask_cpf_cnpj, mask_phone, CNPJ_LEN, CPF_LEN};
