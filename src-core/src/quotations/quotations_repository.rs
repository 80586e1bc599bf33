use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::customers::{Customer, CustomerDB};
use crate::db::DbConnection;
use crate::ids::generate_entity_id;
use crate::quotations::quotations_constants::{
    RELATION_CHILD_PRODUCT, RELATION_CUSTOMER, RELATION_QUOTATION_LINES, RELATION_REGION,
    RELATION_SALE_PERSION,
};
use crate::quotations::{QuotationError, Result};
use crate::regions::{Region, RegionDB};
use crate::schema::{customers, quotation_lines, quotations, regions, users};
use crate::users::{User, UserDB};

use super::quotations_model::{
    FindQuotationConfig, NewQuotation, PricedLine, Quotation, QuotationDB, QuotationFilter,
    QuotationLine, QuotationLineDB, Sort,
};

// Self-join alias used to fetch child lines in the same query as their
// parents. The name mirrors the flattened relation path it serves.
diesel::alias!(quotation_lines as quotation_lines__child_product: QuotationLinesChildProduct);

/// One relation-group query result: the base row plus whichever relation
/// sets that query hydrated. Merged by primary key into full aggregates.
#[derive(Debug, Default)]
pub struct PartialQuotation {
    pub base: Option<QuotationDB>,
    pub sale_persion: Option<UserDB>,
    pub customer: Option<CustomerDB>,
    pub region: Option<RegionDB>,
    pub quotation_lines: Option<Vec<QuotationLine>>,
}

/// Relation-aware repository for quotation aggregates.
///
/// Reads are split into an id-determining query (filters, ordering,
/// pagination) and one hydration query per top-level relation group, whose
/// partial results are merged back together keyed by primary key. The id
/// query's ordering is authoritative; hydration queries are unordered.
pub struct QuotationRepository;

impl QuotationRepository {
    pub fn new() -> Self {
        Self
    }

    fn apply_filter(
        filter: &QuotationFilter,
        with_deleted: bool,
    ) -> quotations::BoxedQuery<'static, Sqlite> {
        let mut query = quotations::table.into_boxed();

        if !with_deleted {
            query = query.filter(quotations::deleted_at.is_null());
        }
        if let Some(ids) = &filter.id {
            query = query.filter(quotations::id.eq_any(ids.clone()));
        }
        if let Some(code) = &filter.code {
            query = query.filter(quotations::code.eq(code.clone()));
        }
        if let Some(title) = &filter.title {
            query = query.filter(quotations::title.eq(title.clone()));
        }
        if let Some(sale_persion_id) = &filter.sale_persion_id {
            query = query.filter(quotations::sale_persion_id.eq(sale_persion_id.clone()));
        }
        if let Some(customer_id) = &filter.customer_id {
            query = query.filter(quotations::customer_id.eq(customer_id.clone()));
        }
        if let Some(region_id) = &filter.region_id {
            query = query.filter(quotations::region_id.eq(region_id.clone()));
        }
        if let Some(created_at) = &filter.created_at {
            if let Some(gt) = created_at.gt {
                query = query.filter(quotations::created_at.gt(gt.naive_utc()));
            }
            if let Some(gte) = created_at.gte {
                query = query.filter(quotations::created_at.ge(gte.naive_utc()));
            }
            if let Some(lt) = created_at.lt {
                query = query.filter(quotations::created_at.lt(lt.naive_utc()));
            }
            if let Some(lte) = created_at.lte {
                query = query.filter(quotations::created_at.le(lte.naive_utc()));
            }
        }
        if let Some(updated_at) = &filter.updated_at {
            if let Some(gt) = updated_at.gt {
                query = query.filter(quotations::updated_at.gt(gt.naive_utc()));
            }
            if let Some(gte) = updated_at.gte {
                query = query.filter(quotations::updated_at.ge(gte.naive_utc()));
            }
            if let Some(lt) = updated_at.lt {
                query = query.filter(quotations::updated_at.lt(lt.naive_utc()));
            }
            if let Some(lte) = updated_at.lte {
                query = query.filter(quotations::updated_at.le(lte.naive_utc()));
            }
        }

        query
    }

    fn apply_order(
        query: quotations::BoxedQuery<'static, Sqlite>,
        order: Option<&Sort>,
    ) -> quotations::BoxedQuery<'static, Sqlite> {
        let default = Sort {
            id: "created_at".to_string(),
            desc: true,
        };
        let order = order.unwrap_or(&default);

        match order.id.as_str() {
            "code" => {
                if order.desc {
                    query.order(quotations::code.desc())
                } else {
                    query.order(quotations::code.asc())
                }
            }
            "title" => {
                if order.desc {
                    query.order(quotations::title.desc())
                } else {
                    query.order(quotations::title.asc())
                }
            }
            "date" => {
                if order.desc {
                    query.order(quotations::date.desc())
                } else {
                    query.order(quotations::date.asc())
                }
            }
            "updated_at" => {
                if order.desc {
                    query.order(quotations::updated_at.desc())
                } else {
                    query.order(quotations::updated_at.asc())
                }
            }
            _ => {
                if order.desc {
                    query.order(quotations::created_at.desc())
                } else {
                    query.order(quotations::created_at.asc())
                }
            }
        }
    }

    /// Runs the filtered, ordered, paginated id query that fixes the result
    /// set's identity and order. The count is only meaningful when
    /// `should_count` is set; callers asking for no count get zero back.
    pub fn query_ids(
        &self,
        conn: &mut DbConnection,
        filter: &QuotationFilter,
        config: &FindQuotationConfig,
        should_count: bool,
    ) -> Result<(Vec<String>, i64)> {
        let count = if should_count {
            Self::apply_filter(filter, config.with_deleted)
                .count()
                .get_result::<i64>(conn)?
        } else {
            0
        };

        let query = Self::apply_filter(filter, config.with_deleted);
        let ids = Self::apply_order(query, config.order.as_ref())
            .select(quotations::id)
            .offset(config.skip)
            .limit(config.take)
            .load::<String>(conn)?;

        Ok((ids, count))
    }

    /// Splits dotted relation paths by their first segment, so each group
    /// can be join-fetched in a single query without cross-branch row
    /// duplication.
    pub fn group_relation_paths(relations: &[String]) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for relation in relations {
            let top_level = relation
                .split('.')
                .next()
                .unwrap_or(relation.as_str())
                .to_string();
            grouped.entry(top_level).or_default().push(relation.clone());
        }
        grouped
    }

    /// Issues one query per top-level relation group, each restricted to the
    /// given id set, and returns the partial aggregates keyed by id.
    pub fn fetch_with_relations(
        &self,
        conn: &mut DbConnection,
        ids: &[String],
        grouped: &BTreeMap<String, Vec<String>>,
        with_deleted: bool,
    ) -> Result<Vec<(String, PartialQuotation)>> {
        let mut partials: Vec<(String, PartialQuotation)> = Vec::new();

        for (top_level, paths) in grouped {
            match top_level.as_str() {
                RELATION_SALE_PERSION => {
                    Self::ensure_leaf_paths(top_level, paths)?;
                    self.fetch_sale_persion_partials(conn, ids, with_deleted, &mut partials)?;
                }
                RELATION_CUSTOMER => {
                    Self::ensure_leaf_paths(top_level, paths)?;
                    self.fetch_customer_partials(conn, ids, with_deleted, &mut partials)?;
                }
                RELATION_REGION => {
                    Self::ensure_leaf_paths(top_level, paths)?;
                    self.fetch_region_partials(conn, ids, with_deleted, &mut partials)?;
                }
                RELATION_QUOTATION_LINES => {
                    let with_children = Self::line_paths_request_children(paths)?;
                    self.fetch_line_partials(conn, ids, with_deleted, with_children, &mut partials)?;
                }
                other => {
                    return Err(QuotationError::InvalidData(format!(
                        "Unknown relation: {}",
                        other
                    )));
                }
            }
        }

        Ok(partials)
    }

    fn ensure_leaf_paths(top_level: &str, paths: &[String]) -> Result<()> {
        for path in paths {
            if path != top_level {
                return Err(QuotationError::InvalidData(format!(
                    "Unknown relation: {}",
                    path
                )));
            }
        }
        Ok(())
    }

    fn line_paths_request_children(paths: &[String]) -> Result<bool> {
        let mut with_children = false;
        for path in paths {
            if path == RELATION_CHILD_PRODUCT {
                with_children = true;
            } else if path != RELATION_QUOTATION_LINES {
                return Err(QuotationError::InvalidData(format!(
                    "Unknown relation: {}",
                    path
                )));
            }
        }
        Ok(with_children)
    }

    fn fetch_sale_persion_partials(
        &self,
        conn: &mut DbConnection,
        ids: &[String],
        with_deleted: bool,
        partials: &mut Vec<(String, PartialQuotation)>,
    ) -> Result<()> {
        let mut query = quotations::table
            .left_join(
                users::table.on(users::id
                    .nullable()
                    .eq(quotations::sale_persion_id)
                    .and(users::deleted_at.is_null())),
            )
            .select((QuotationDB::as_select(), Option::<UserDB>::as_select()))
            .into_boxed();

        query = query.filter(quotations::id.eq_any(ids.to_vec()));
        if !with_deleted {
            query = query.filter(quotations::deleted_at.is_null());
        }

        let rows = query.load::<(QuotationDB, Option<UserDB>)>(conn)?;
        for (base, sale_persion) in rows {
            partials.push((
                base.id.clone(),
                PartialQuotation {
                    base: Some(base),
                    sale_persion,
                    ..Default::default()
                },
            ));
        }
        Ok(())
    }

    fn fetch_customer_partials(
        &self,
        conn: &mut DbConnection,
        ids: &[String],
        with_deleted: bool,
        partials: &mut Vec<(String, PartialQuotation)>,
    ) -> Result<()> {
        let mut query = quotations::table
            .left_join(
                customers::table.on(customers::id
                    .nullable()
                    .eq(quotations::customer_id)
                    .and(customers::deleted_at.is_null())),
            )
            .select((QuotationDB::as_select(), Option::<CustomerDB>::as_select()))
            .into_boxed();

        query = query.filter(quotations::id.eq_any(ids.to_vec()));
        if !with_deleted {
            query = query.filter(quotations::deleted_at.is_null());
        }

        let rows = query.load::<(QuotationDB, Option<CustomerDB>)>(conn)?;
        for (base, customer) in rows {
            partials.push((
                base.id.clone(),
                PartialQuotation {
                    base: Some(base),
                    customer,
                    ..Default::default()
                },
            ));
        }
        Ok(())
    }

    fn fetch_region_partials(
        &self,
        conn: &mut DbConnection,
        ids: &[String],
        with_deleted: bool,
        partials: &mut Vec<(String, PartialQuotation)>,
    ) -> Result<()> {
        let mut query = quotations::table
            .left_join(
                regions::table.on(regions::id
                    .nullable()
                    .eq(quotations::region_id)
                    .and(regions::deleted_at.is_null())),
            )
            .select((QuotationDB::as_select(), Option::<RegionDB>::as_select()))
            .into_boxed();

        query = query.filter(quotations::id.eq_any(ids.to_vec()));
        if !with_deleted {
            query = query.filter(quotations::deleted_at.is_null());
        }

        let rows = query.load::<(QuotationDB, Option<RegionDB>)>(conn)?;
        for (base, region) in rows {
            partials.push((
                base.id.clone(),
                PartialQuotation {
                    base: Some(base),
                    region,
                    ..Default::default()
                },
            ));
        }
        Ok(())
    }

    fn fetch_line_partials(
        &self,
        conn: &mut DbConnection,
        ids: &[String],
        with_deleted: bool,
        with_children: bool,
        partials: &mut Vec<(String, PartialQuotation)>,
    ) -> Result<()> {
        if with_children {
            let children = quotation_lines__child_product;
            let mut query = quotations::table
                .left_join(
                    quotation_lines::table.on(quotation_lines::quotation_id
                        .eq(quotations::id.nullable())
                        .and(quotation_lines::parent_line_id.is_null())
                        .and(quotation_lines::deleted_at.is_null())),
                )
                .left_join(
                    children.on(children
                        .field(quotation_lines::parent_line_id)
                        .eq(quotation_lines::id.nullable())
                        .and(children.field(quotation_lines::deleted_at).is_null())),
                )
                .select((
                    QuotationDB::as_select(),
                    Option::<QuotationLineDB>::as_select(),
                    children
                        .fields(quotation_lines::all_columns)
                        .nullable(),
                ))
                .into_boxed();

            query = query.filter(quotations::id.eq_any(ids.to_vec()));
            if !with_deleted {
                query = query.filter(quotations::deleted_at.is_null());
            }

            let rows =
                query.load::<(QuotationDB, Option<QuotationLineDB>, Option<QuotationLineDB>)>(conn)?;
            Self::collect_line_partials(rows, true, partials);
        } else {
            let mut query = quotations::table
                .left_join(
                    quotation_lines::table.on(quotation_lines::quotation_id
                        .eq(quotations::id.nullable())
                        .and(quotation_lines::parent_line_id.is_null())
                        .and(quotation_lines::deleted_at.is_null())),
                )
                .select((QuotationDB::as_select(), Option::<QuotationLineDB>::as_select()))
                .into_boxed();

            query = query.filter(quotations::id.eq_any(ids.to_vec()));
            if !with_deleted {
                query = query.filter(quotations::deleted_at.is_null());
            }

            let rows = query.load::<(QuotationDB, Option<QuotationLineDB>)>(conn)?;
            let rows = rows
                .into_iter()
                .map(|(base, line)| (base, line, None))
                .collect();
            Self::collect_line_partials(rows, false, partials);
        }

        Ok(())
    }

    fn collect_line_partials(
        rows: Vec<(QuotationDB, Option<QuotationLineDB>, Option<QuotationLineDB>)>,
        with_children: bool,
        partials: &mut Vec<(String, PartialQuotation)>,
    ) {
        struct LineAccumulator {
            base: QuotationDB,
            lines: Vec<QuotationLine>,
            line_index: HashMap<String, usize>,
        }

        let mut order: Vec<String> = Vec::new();
        let mut grouped: HashMap<String, LineAccumulator> = HashMap::new();

        for (base, line, child) in rows {
            let quotation_id = base.id.clone();
            let entry = grouped.entry(quotation_id.clone()).or_insert_with(|| {
                order.push(quotation_id.clone());
                LineAccumulator {
                    base,
                    lines: Vec::new(),
                    line_index: HashMap::new(),
                }
            });

            let Some(line_db) = line else {
                continue;
            };

            let index = match entry.line_index.get(&line_db.id) {
                Some(index) => *index,
                None => {
                    let mut line: QuotationLine = line_db.clone().into();
                    if with_children {
                        line.child_product = Some(Vec::new());
                    }
                    entry.lines.push(line);
                    let index = entry.lines.len() - 1;
                    entry.line_index.insert(line_db.id, index);
                    index
                }
            };

            if let Some(child_db) = child {
                if let Some(children) = entry.lines[index].child_product.as_mut() {
                    children.push(child_db.into());
                }
            }
        }

        for quotation_id in order {
            let accumulator = grouped.remove(&quotation_id).expect("grouped entry");
            partials.push((
                quotation_id,
                PartialQuotation {
                    base: Some(accumulator.base),
                    quotation_lines: Some(accumulator.lines),
                    ..Default::default()
                },
            ));
        }
    }

    /// Folds partial aggregates into one quotation per id, in the order the
    /// id query produced. Ids with no surviving base row are dropped.
    pub fn merge_by_identity(
        ordered_ids: &[String],
        partials: Vec<(String, PartialQuotation)>,
    ) -> Vec<Quotation> {
        let mut merged: HashMap<String, PartialQuotation> = HashMap::new();
        for (id, partial) in partials {
            let entry = merged.entry(id).or_default();
            if entry.base.is_none() {
                entry.base = partial.base;
            }
            if partial.sale_persion.is_some() {
                entry.sale_persion = partial.sale_persion;
            }
            if partial.customer.is_some() {
                entry.customer = partial.customer;
            }
            if partial.region.is_some() {
                entry.region = partial.region;
            }
            if partial.quotation_lines.is_some() {
                entry.quotation_lines = partial.quotation_lines;
            }
        }

        ordered_ids
            .iter()
            .filter_map(|id| {
                let partial = merged.remove(id)?;
                let base = partial.base?;
                let mut quotation: Quotation = base.into();
                quotation.sale_persion = partial.sale_persion.map(User::from);
                quotation.customer = partial.customer.map(Customer::from);
                quotation.region = partial.region.map(Region::from);
                quotation.quotation_lines = partial.quotation_lines;
                Some(quotation)
            })
            .collect()
    }

    fn find_rows_by_ids(
        &self,
        conn: &mut DbConnection,
        ids: &[String],
        with_deleted: bool,
    ) -> Result<Vec<QuotationDB>> {
        let mut query = quotations::table.into_boxed();
        query = query.filter(quotations::id.eq_any(ids.to_vec()));
        if !with_deleted {
            query = query.filter(quotations::deleted_at.is_null());
        }
        Ok(query.load::<QuotationDB>(conn)?)
    }

    fn hydrate_ids(
        &self,
        conn: &mut DbConnection,
        ids: &[String],
        relations: &[String],
        with_deleted: bool,
    ) -> Result<Vec<Quotation>> {
        if ids.is_empty() {
            // no need to continue
            return Ok(Vec::new());
        }

        if relations.is_empty() {
            let rows = self.find_rows_by_ids(conn, ids, with_deleted)?;
            let mut by_id: HashMap<String, QuotationDB> =
                rows.into_iter().map(|row| (row.id.clone(), row)).collect();
            return Ok(ids
                .iter()
                .filter_map(|id| by_id.remove(id))
                .map(Quotation::from)
                .collect());
        }

        let grouped = Self::group_relation_paths(relations);
        let partials = self.fetch_with_relations(conn, ids, &grouped, with_deleted)?;
        Ok(Self::merge_by_identity(ids, partials))
    }

    pub fn find_with_relations(
        &self,
        conn: &mut DbConnection,
        relations: &[String],
        filter: &QuotationFilter,
        config: &FindQuotationConfig,
    ) -> Result<Vec<Quotation>> {
        let (ids, _) = self.query_ids(conn, filter, config, false)?;
        self.hydrate_ids(conn, &ids, relations, config.with_deleted)
    }

    pub fn find_with_relations_and_count(
        &self,
        conn: &mut DbConnection,
        relations: &[String],
        filter: &QuotationFilter,
        config: &FindQuotationConfig,
    ) -> Result<(Vec<Quotation>, i64)> {
        let (ids, count) = self.query_ids(conn, filter, config, true)?;
        let quotations = self.hydrate_ids(conn, &ids, relations, config.with_deleted)?;
        Ok((quotations, count))
    }

    pub fn find_by_ids_with_relations(
        &self,
        conn: &mut DbConnection,
        ids: &[String],
        relations: &[String],
        with_deleted: bool,
    ) -> Result<Vec<Quotation>> {
        self.hydrate_ids(conn, ids, relations, with_deleted)
    }

    pub fn find_one_with_relations(
        &self,
        conn: &mut DbConnection,
        relations: &[String],
        filter: &QuotationFilter,
        config: &FindQuotationConfig,
    ) -> Result<Option<Quotation>> {
        let mut config = config.clone();
        config.take = 1;
        let mut result = self.find_with_relations(conn, relations, filter, &config)?;
        if result.is_empty() {
            Ok(None)
        } else {
            Ok(Some(result.remove(0)))
        }
    }

    /// Case-insensitive substring search over code and title. Free text
    /// supersedes exact-match filters on those two columns; any other
    /// structured predicates still apply.
    pub fn free_text_search_and_count(
        &self,
        conn: &mut DbConnection,
        q: &str,
        filter: &QuotationFilter,
        config: &FindQuotationConfig,
        relations: &[String],
    ) -> Result<(Vec<Quotation>, i64)> {
        let mut cleaned = filter.clone();
        cleaned.q = None;
        cleaned.code = None;
        cleaned.title = None;

        let pattern = format!("%{}%", q);
        let build = || {
            Self::apply_filter(&cleaned, config.with_deleted).filter(
                quotations::code
                    .like(pattern.clone())
                    .or(quotations::title.like(pattern.clone())),
            )
        };

        let count = build().count().get_result::<i64>(conn)?;

        let ids = Self::apply_order(build(), config.order.as_ref())
            .select(quotations::id)
            .offset(config.skip)
            .limit(config.take)
            .load::<String>(conn)?;

        let quotations = self.hydrate_ids(conn, &ids, relations, config.with_deleted)?;
        Ok((quotations, count))
    }

    pub fn find_row_by_id(
        &self,
        conn: &mut DbConnection,
        quotation_id: &str,
        with_deleted: bool,
    ) -> Result<Option<QuotationDB>> {
        let mut query = quotations::table.into_boxed();
        query = query.filter(quotations::id.eq(quotation_id.to_string()));
        if !with_deleted {
            query = query.filter(quotations::deleted_at.is_null());
        }
        Ok(query.first::<QuotationDB>(conn).optional()?)
    }

    /// Persists the quotation with its resolved line tree: quotation row
    /// first, then every line row in one batch, children referencing their
    /// parent line's freshly generated id.
    pub fn insert(
        &self,
        conn: &mut DbConnection,
        new_quotation: &NewQuotation,
        lines: &[PricedLine],
    ) -> Result<String> {
        let now = Utc::now().naive_utc();
        let quotation_id = generate_entity_id("quot");

        let metadata = match &new_quotation.metadata {
            Some(value) => Some(
                serde_json::to_string(value)
                    .map_err(|e| QuotationError::InvalidData(e.to_string()))?,
            ),
            None => None,
        };

        let row = QuotationDB {
            id: quotation_id.clone(),
            sale_persion_id: Some(new_quotation.sale_persion_id.clone()),
            customer_id: Some(new_quotation.customer_id.clone()),
            region_id: Some(new_quotation.region_id.clone()),
            title: new_quotation.title.clone(),
            code: new_quotation.code.clone(),
            date: Some(new_quotation.parse_date()?),
            heading: Some(new_quotation.heading.clone()),
            condition: Some(new_quotation.condition.clone()),
            payment_term: Some(new_quotation.payment_term.clone()),
            delivery_lead_time: Some(new_quotation.delivery_lead_time.clone()),
            warranty: Some(new_quotation.warranty.clone()),
            install_support: Some(new_quotation.install_support.clone()),
            appendix_a: Some(new_quotation.appendix_a.clone()),
            appendix_b: Some(new_quotation.appendix_b.clone()),
            metadata,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        diesel::insert_into(quotations::table)
            .values(&row)
            .execute(conn)?;

        let mut line_rows: Vec<QuotationLineDB> = Vec::new();
        for line in lines {
            let line_id = generate_entity_id("qline");
            line_rows.push(QuotationLineDB {
                id: line_id.clone(),
                quotation_id: Some(quotation_id.clone()),
                parent_line_id: None,
                product_id: line.product_id.clone(),
                volume: line.volume,
                unit_price: line.unit_price,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            });
            for child in &line.child_product {
                line_rows.push(QuotationLineDB {
                    id: generate_entity_id("qline"),
                    quotation_id: None,
                    parent_line_id: Some(line_id.clone()),
                    product_id: child.product_id.clone(),
                    volume: child.volume,
                    unit_price: child.unit_price,
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                });
            }
        }

        if !line_rows.is_empty() {
            diesel::insert_into(quotation_lines::table)
                .values(&line_rows)
                .execute(conn)?;
        }

        Ok(quotation_id)
    }

    /// Soft-deletes the quotation and cascades to its line tree.
    pub fn soft_delete(&self, conn: &mut DbConnection, quotation_id: &str) -> Result<()> {
        let now = Utc::now().naive_utc();

        diesel::update(quotations::table.filter(quotations::id.eq(quotation_id.to_string())))
            .set((
                quotations::deleted_at.eq(now),
                quotations::updated_at.eq(now),
            ))
            .execute(conn)?;

        let line_ids: Vec<String> = quotation_lines::table
            .filter(quotation_lines::quotation_id.eq(quotation_id.to_string()))
            .filter(quotation_lines::deleted_at.is_null())
            .select(quotation_lines::id)
            .load::<String>(conn)?;

        diesel::update(
            quotation_lines::table.filter(
                quotation_lines::quotation_id
                    .eq(quotation_id.to_string())
                    .or(quotation_lines::parent_line_id.eq_any(line_ids)),
            ),
        )
        .set((
            quotation_lines::deleted_at.eq(now),
            quotation_lines::updated_at.eq(now),
        ))
        .execute(conn)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn base_row(id: &str) -> QuotationDB {
        let now = NaiveDate::from_ymd_opt(2024, 6, 18)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        QuotationDB {
            id: id.to_string(),
            sale_persion_id: None,
            customer_id: None,
            region_id: None,
            title: "Quotation".to_string(),
            code: "Q-1".to_string(),
            date: None,
            heading: None,
            condition: None,
            payment_term: None,
            delivery_lead_time: None,
            warranty: None,
            install_support: None,
            appendix_a: None,
            appendix_b: None,
            metadata: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn groups_relation_paths_by_head_segment() {
        let grouped = QuotationRepository::group_relation_paths(&strings(&[
            "quotation_lines",
            "quotation_lines.child_product",
            "customer",
        ]));

        assert_eq!(grouped.len(), 2);
        assert_eq!(
            grouped["quotation_lines"],
            strings(&["quotation_lines", "quotation_lines.child_product"])
        );
        assert_eq!(grouped["customer"], strings(&["customer"]));
    }

    #[test]
    fn merge_combines_partials_for_the_same_id() {
        let line = QuotationLine::from(QuotationLineDB {
            id: "qline_1".to_string(),
            quotation_id: Some("quot_1".to_string()),
            parent_line_id: None,
            product_id: "prod_1".to_string(),
            volume: 2,
            unit_price: 100,
            created_at: base_row("quot_1").created_at,
            updated_at: base_row("quot_1").created_at,
            deleted_at: None,
        });

        let partials = vec![
            (
                "quot_1".to_string(),
                PartialQuotation {
                    base: Some(base_row("quot_1")),
                    quotation_lines: Some(vec![line]),
                    ..Default::default()
                },
            ),
            (
                "quot_1".to_string(),
                PartialQuotation {
                    base: Some(base_row("quot_1")),
                    ..Default::default()
                },
            ),
        ];

        let merged = QuotationRepository::merge_by_identity(&strings(&["quot_1"]), partials);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "quot_1");
        assert_eq!(merged[0].quotation_lines.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn merge_preserves_the_ordered_id_sequence() {
        let partials = vec![
            (
                "quot_2".to_string(),
                PartialQuotation {
                    base: Some(base_row("quot_2")),
                    ..Default::default()
                },
            ),
            (
                "quot_1".to_string(),
                PartialQuotation {
                    base: Some(base_row("quot_1")),
                    ..Default::default()
                },
            ),
        ];

        let merged = QuotationRepository::merge_by_identity(
            &strings(&["quot_1", "quot_2"]),
            partials,
        );
        let ids: Vec<&str> = merged.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["quot_1", "quot_2"]);
    }

    #[test]
    fn merge_drops_ids_without_a_base_row() {
        let partials = vec![(
            "quot_1".to_string(),
            PartialQuotation {
                quotation_lines: Some(Vec::new()),
                ..Default::default()
            },
        )];

        let merged = QuotationRepository::merge_by_identity(&strings(&["quot_1"]), partials);
        assert!(merged.is_empty());
    }
}
