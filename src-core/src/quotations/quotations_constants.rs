/// Relation names accepted by the quotation repository.
pub const RELATION_SALE_PERSION: &str = "sale_persion";
pub const RELATION_CUSTOMER: &str = "customer";
pub const RELATION_REGION: &str = "region";
pub const RELATION_QUOTATION_LINES: &str = "quotation_lines";
pub const RELATION_CHILD_PRODUCT: &str = "quotation_lines.child_product";

/// Relations expanded on admin reads unless the caller narrows them.
pub const DEFAULT_QUOTATION_RELATIONS: &[&str] = &[
    RELATION_CUSTOMER,
    RELATION_SALE_PERSION,
    RELATION_REGION,
    RELATION_QUOTATION_LINES,
    RELATION_CHILD_PRODUCT,
];

pub const DEFAULT_PAGE_SIZE: i64 = 20;
