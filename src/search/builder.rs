use crate::config::SearchConfig;

use super::filter::SearchFilter;

/// Columns callers may sort by. Anything outside this list silently falls
/// back to the default ordering, so no user input ever reaches SQL text.
const SORT_FIELDS: &[&str] = &["price", "created_at", "city", "operation_type"];

/// Default ordering: priced rows first, most expensive first, newest first.
const DEFAULT_ORDER: &str =
    "ORDER BY CASE WHEN price > 0 THEN 0 ELSE 1 END, price DESC NULLS LAST, created_at DESC";

const SELECT_COLUMNS: &str = "id, title, description, price, city, operation_type, \
     property_type, image, address, state, link, bedrooms, bathrooms, parking_spaces, \
     area_m2, amenities, features, created_at";

/// A positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Text(String),
    Float(f64),
    Int(i64),
}

/// A parameterized SELECT plus the COUNT sharing its WHERE clause. The
/// builder never executes anything; callers bind the params in order and run
/// both statements themselves.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub select_sql: String,
    pub count_sql: String,
    where_params: Vec<QueryParam>,
    pub limit: i64,
    pub offset: i64,
}

impl BuiltQuery {
    /// Parameters for the COUNT statement.
    pub fn count_params(&self) -> &[QueryParam] {
        &self.where_params
    }

    /// Parameters for the SELECT statement: the WHERE params followed by
    /// LIMIT and OFFSET.
    pub fn select_params(&self) -> Vec<QueryParam> {
        let mut params = self.where_params.clone();
        params.push(QueryParam::Int(self.limit));
        params.push(QueryParam::Int(self.offset));
        params
    }
}

/// Translate a cleaned filter set into the page SELECT and matching COUNT.
pub fn build_search(filter: &SearchFilter, cfg: &SearchConfig) -> BuiltQuery {
    let mut conditions: Vec<String> = vec!["active = true".to_string()];
    let mut params: Vec<QueryParam> = Vec::new();

    // Price floor: a non-positive caller value is treated as unset, and the
    // floor only disappears with the explicit opt-out flag.
    let price_min = match filter.price_min.filter(|m| *m > 0.0) {
        Some(min) => Some(min),
        None if filter.no_price_floor => None,
        None => Some(cfg.price_floor),
    };
    if let Some(min) = price_min {
        params.push(QueryParam::Float(min));
        conditions.push(format!("price >= ${}", params.len()));
    }
    if let Some(max) = filter.price_max {
        params.push(QueryParam::Float(max));
        conditions.push(format!("price <= ${}", params.len()));
    }

    push_in_list(&mut conditions, &mut params, "city", &filter.cities);
    push_in_list(&mut conditions, &mut params, "operation_type", &filter.operation_types);
    push_in_list(&mut conditions, &mut params, "property_type", &filter.property_types);
    push_in_ints(&mut conditions, &mut params, "bedrooms", &filter.bedrooms);
    push_in_ints(&mut conditions, &mut params, "bathrooms", &filter.bathrooms);
    push_in_ints(&mut conditions, &mut params, "parking_spaces", &filter.parking);

    if let Some(min) = filter.area_min {
        params.push(QueryParam::Int(min as i64));
        conditions.push(format!("area_m2 >= ${}", params.len()));
    }
    if let Some(max) = filter.area_max {
        params.push(QueryParam::Int(max as i64));
        conditions.push(format!("area_m2 <= ${}", params.len()));
    }

    if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        params.push(QueryParam::Text(format!("%{}%", q)));
        let n = params.len();
        conditions.push(format!(
            "(title ILIKE ${n} OR description ILIKE ${n} OR address ILIKE ${n})"
        ));
    }

    let where_clause = conditions.join(" AND ");

    let order_by = match filter.sort.as_deref() {
        Some(field) if SORT_FIELDS.contains(&field) => {
            format!("ORDER BY {} DESC NULLS LAST", field)
        }
        _ => DEFAULT_ORDER.to_string(),
    };

    let page = filter.page.max(1);
    let per_page = filter.per_page.max(1);
    let limit = per_page as i64;
    let offset = (page as i64 - 1) * per_page as i64;

    let select_sql = format!(
        "SELECT {} FROM properties WHERE {} {} LIMIT ${} OFFSET ${}",
        SELECT_COLUMNS,
        where_clause,
        order_by,
        params.len() + 1,
        params.len() + 2,
    );
    let count_sql = format!("SELECT COUNT(*) FROM properties WHERE {}", where_clause);

    BuiltQuery {
        select_sql,
        count_sql,
        where_params: params,
        limit,
        offset,
    }
}

fn push_in_list(
    conditions: &mut Vec<String>,
    params: &mut Vec<QueryParam>,
    column: &str,
    values: &[String],
) {
    if values.is_empty() {
        return;
    }
    let start = params.len();
    let placeholders: Vec<String> = (0..values.len()).map(|i| format!("${}", start + i + 1)).collect();
    conditions.push(format!("{} IN ({})", column, placeholders.join(",")));
    params.extend(values.iter().cloned().map(QueryParam::Text));
}

fn push_in_ints(
    conditions: &mut Vec<String>,
    params: &mut Vec<QueryParam>,
    column: &str,
    values: &[i32],
) {
    if values.is_empty() {
        return;
    }
    let start = params.len();
    let placeholders: Vec<String> = (0..values.len()).map(|i| format!("${}", start + i + 1)).collect();
    conditions.push(format!("{} IN ({})", column, placeholders.join(",")));
    params.extend(values.iter().map(|v| QueryParam::Int(*v as i64)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;

    fn cfg() -> SearchConfig {
        SearchConfig {
            default_page_size: 60,
            max_page_size: 100,
            price_floor: 1.0,
            allowed_cities: Default::default(),
        }
    }

    fn where_of(sql: &str) -> &str {
        let start = sql.find("WHERE ").expect("WHERE clause") + "WHERE ".len();
        let end = sql[start..]
            .find(" ORDER BY")
            .map(|i| start + i)
            .unwrap_or(sql.len());
        &sql[start..end]
    }

    #[test]
    fn empty_filter_still_restricts_to_active_with_floor() {
        let built = build_search(&SearchFilter { page: 1, per_page: 60, ..Default::default() }, &cfg());
        assert_eq!(where_of(&built.count_sql), "active = true AND price >= $1");
        assert_eq!(built.count_params(), &[QueryParam::Float(1.0)]);
        assert_eq!(built.limit, 60);
        assert_eq!(built.offset, 0);
    }

    #[test]
    fn price_floor_opt_out_removes_predicate() {
        let filter = SearchFilter {
            page: 1,
            per_page: 60,
            no_price_floor: true,
            ..Default::default()
        };
        let built = build_search(&filter, &cfg());
        assert_eq!(where_of(&built.count_sql), "active = true");
        assert!(built.count_params().is_empty());
    }

    #[test]
    fn non_positive_price_min_is_ignored() {
        let filter = SearchFilter {
            page: 1,
            per_page: 60,
            price_min: Some(-5.0),
            ..Default::default()
        };
        let built = build_search(&filter, &cfg());
        // The floor still applies; the bogus caller value is dropped.
        assert_eq!(built.count_params(), &[QueryParam::Float(1.0)]);
    }

    #[test]
    fn select_and_count_share_where_clause() {
        let filter = SearchFilter {
            page: 2,
            per_page: 20,
            cities: vec!["Cuernavaca".into(), "Jiutepec".into()],
            price_min: Some(500_000.0),
            price_max: Some(2_000_000.0),
            bedrooms: vec![2, 3],
            q: Some("alberca".into()),
            ..Default::default()
        };
        let built = build_search(&filter, &cfg());
        assert_eq!(where_of(&built.select_sql), where_of(&built.count_sql));
    }

    #[test]
    fn in_lists_number_placeholders_sequentially() {
        let filter = SearchFilter {
            page: 1,
            per_page: 60,
            no_price_floor: true,
            cities: vec!["Cuernavaca".into(), "Temixco".into()],
            operation_types: vec!["venta".into()],
            ..Default::default()
        };
        let built = build_search(&filter, &cfg());
        assert_eq!(
            where_of(&built.count_sql),
            "active = true AND city IN ($1,$2) AND operation_type IN ($3)"
        );
        assert_eq!(
            built.count_params(),
            &[
                QueryParam::Text("Cuernavaca".into()),
                QueryParam::Text("Temixco".into()),
                QueryParam::Text("venta".into()),
            ]
        );
    }

    #[test]
    fn free_text_binds_once_and_reuses_placeholder() {
        let filter = SearchFilter {
            page: 1,
            per_page: 60,
            no_price_floor: true,
            q: Some("  casa sola ".into()),
            ..Default::default()
        };
        let built = build_search(&filter, &cfg());
        assert_eq!(
            where_of(&built.count_sql),
            "active = true AND (title ILIKE $1 OR description ILIKE $1 OR address ILIKE $1)"
        );
        assert_eq!(built.count_params(), &[QueryParam::Text("%casa sola%".into())]);
    }

    #[test]
    fn empty_cleaned_city_list_adds_no_predicate() {
        let filter = SearchFilter {
            page: 1,
            per_page: 60,
            no_price_floor: true,
            cities: Vec::new(),
            ..Default::default()
        };
        let built = build_search(&filter, &cfg());
        assert_eq!(where_of(&built.count_sql), "active = true");
    }

    #[test]
    fn default_order_puts_priced_rows_first() {
        let built = build_search(&SearchFilter { page: 1, per_page: 60, ..Default::default() }, &cfg());
        assert!(built.select_sql.contains(
            "ORDER BY CASE WHEN price > 0 THEN 0 ELSE 1 END, price DESC NULLS LAST, created_at DESC"
        ));
    }

    #[test]
    fn sort_allow_list_is_enforced() {
        let mut filter = SearchFilter {
            page: 1,
            per_page: 60,
            sort: Some("price".into()),
            ..Default::default()
        };
        let built = build_search(&filter, &cfg());
        assert!(built.select_sql.contains("ORDER BY price DESC NULLS LAST"));

        // Injection attempts fall back to the default ordering.
        filter.sort = Some("price; DROP TABLE properties".into());
        let built = build_search(&filter, &cfg());
        assert!(built.select_sql.contains("ORDER BY CASE WHEN price > 0"));
    }

    #[test]
    fn pagination_arithmetic() {
        let filter = SearchFilter { page: 2, per_page: 20, ..Default::default() };
        let built = build_search(&filter, &cfg());
        assert_eq!(built.limit, 20);
        assert_eq!(built.offset, 20);
        let params = built.select_params();
        assert_eq!(&params[params.len() - 2..], &[QueryParam::Int(20), QueryParam::Int(20)]);
        // LIMIT/OFFSET placeholders come right after the WHERE params.
        assert!(built.select_sql.ends_with("LIMIT $2 OFFSET $3"));
    }
}
