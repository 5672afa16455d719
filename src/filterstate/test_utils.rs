use crate::model::{
    BooleanFilter, MultiSelectFilter, RangeFilter, RangeType, SelectFilter, SelectOption,
    TransformerFilter,
};
use crate::registry::Registry;

/// A registry with one filter of every kind (two extra range types).
///
/// | Key | Kind |
/// |-----|------|
/// | `active` | boolean, key `true` |
/// | `price` | range, number |
/// | `created` | range, date |
/// | `updated_at` | range, datetime |
/// | `status` | select |
/// | `tags` | multi-select |
/// | `search` | transformer |
pub fn sample_registry() -> Registry {
    Registry::builder()
        .filter("active", BooleanFilter::new("active", true).label("Active only"))
        .filter("price", RangeFilter::new("price", RangeType::Number))
        .filter("created", RangeFilter::new("created_on", RangeType::Date))
        .filter(
            "updated_at",
            RangeFilter::new("updated_at", RangeType::DateTime),
        )
        .filter(
            "status",
            SelectFilter::new("status").options(vec![
                SelectOption::new("Open", 1),
                SelectOption::new("Closed", 2),
            ]),
        )
        .filter("tags", MultiSelectFilter::new("tags"))
        .filter("search", TransformerFilter::new("full_text"))
        .build()
}
