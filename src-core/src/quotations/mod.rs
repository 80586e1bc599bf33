pub(crate) mod quotations_constants;
pub(crate) mod quotations_errors;
pub(crate) mod quotations_model;
pub(crate) mod quotations_repository;
pub(crate) mod quotations_service;
pub(crate) mod quotations_traits;

pub use quotations_constants::*;
pub use quotations_errors::{QuotationError, Result};
pub use quotations_model::{
    DateComparison, FindQuotationConfig, NewQuotation, NewQuotationChildLine, NewQuotationLine,
    PricedLine, Quotation, QuotationDB, QuotationFilter, QuotationLine, QuotationLineDB, Sort,
};
pub use quotations_repository::{PartialQuotation, QuotationRepository};
pub use quotations_service::QuotationService;
pub use quotations_traits::QuotationServiceTrait;
