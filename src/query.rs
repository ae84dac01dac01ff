use serde::Deserialize;

/// SQL query builder for constructing parameterized movie-catalog queries
/// Builds a single SQL query with filters, sorting, and pagination
pub struct SQLQueryBuilder {
    base_query: String,
    where_clauses: Vec<String>,
    params: Vec<String>,
    order_clause: Option<String>,
    limit: u32,
    offset: u32,
}

impl SQLQueryBuilder {
    /// Creates a new SQLQueryBuilder with default values
    pub fn new() -> Self {
        Self {
            base_query: "SELECT * FROM movies".to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_clause: None,
            limit: 10,
            offset: 0,
        }
    }

    /// Adds a search filter for partial movie-name matching (case-insensitive)
    /// Uses ILIKE for PostgreSQL case-insensitive pattern matching
    pub fn add_search_filter(&mut self, search: &str) {
        let param_index = self.params.len() + 1;
        self.where_clauses
            .push(format!("movie_name ILIKE ${}", param_index));
        self.params.push(format!("%{}%", search));
    }

    /// Adds a genre filter for exact genre matching (case-insensitive)
    pub fn add_genre_filter(&mut self, genre: &str) {
        let param_index = self.params.len() + 1;
        self.where_clauses
            .push(format!("genre ILIKE ${}", param_index));
        self.params.push(genre.to_string());
    }

    /// Adds rating range filters (min and/or max), both bounds inclusive
    pub fn add_rating_range(&mut self, min: Option<f64>, max: Option<f64>) {
        if let Some(min_rating) = min {
            let param_index = self.params.len() + 1;
            self.where_clauses
                .push(format!("rating >= ${}::float8", param_index));
            self.params.push(min_rating.to_string());
        }

        if let Some(max_rating) = max {
            let param_index = self.params.len() + 1;
            self.where_clauses
                .push(format!("rating <= ${}::float8", param_index));
            self.params.push(max_rating.to_string());
        }
    }

    /// Sets the sort order for the query
    /// Adds an ORDER BY clause with the specified field and order
    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        let field_name = match field {
            SortField::Rating => "rating",
            SortField::ReleaseDate => "rdate",
        };

        let order_str = match order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };

        self.order_clause = Some(format!("{} {}", field_name, order_str));
    }

    /// Sets pagination parameters
    /// Calculates LIMIT and OFFSET based on page number and limit
    pub fn set_pagination(&mut self, page: u32, limit: u32) {
        self.limit = limit;
        self.offset = (page - 1) * limit;
    }

    /// Builds the final SQL query string with all parameters
    /// Returns a tuple of (query_string, parameters)
    pub fn build(&self) -> (String, Vec<String>) {
        let mut query = self.base_query.clone();

        if !self.where_clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(ref order) = self.order_clause {
            query.push_str(" ORDER BY ");
            query.push_str(order);
        }

        // LIMIT and OFFSET go into the query string directly; PostgreSQL
        // requires integers here, not text parameters
        query.push_str(&format!(" LIMIT {}", self.limit));
        query.push_str(&format!(" OFFSET {}", self.offset));

        (query, self.params.clone())
    }
}

/// Query parameters extracted from HTTP request
/// All fields are optional to support flexible querying
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// Search term for partial movie-name matching (case-insensitive)
    pub search: Option<String>,
    /// Filter by genre (case-insensitive exact match)
    pub genre: Option<String>,
    /// Minimum rating filter (inclusive)
    pub min_rating: Option<f64>,
    /// Maximum rating filter (inclusive)
    pub max_rating: Option<f64>,
    /// Sort field: "rating" or "rdate"
    pub sort: Option<String>,
    /// Sort order: "asc" or "desc"
    pub order: Option<String>,
    /// Page number (1-indexed, defaults to 1)
    pub page: Option<u32>,
    /// Items per page (defaults to 10)
    pub limit: Option<u32>,
}

/// Sort field options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Rating,
    ReleaseDate,
}

/// Sort order options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Validated and normalized query parameters
#[derive(Debug)]
pub struct ValidatedQuery {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub sort_field: Option<SortField>,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

/// Validation error type for query parameters
#[derive(Debug)]
pub struct QueryError {
    pub message: String,
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for QueryError {}

/// Query parameter validator
pub struct QueryValidator;

impl QueryValidator {
    /// Validates and normalizes query parameters
    /// Returns ValidatedQuery on success or QueryError on failure
    pub fn validate(params: QueryParams) -> Result<ValidatedQuery, QueryError> {
        let search = Self::normalize_string(params.search);
        let genre = Self::normalize_string(params.genre);

        let min_rating = if let Some(rating) = params.min_rating {
            Self::validate_rating(rating, "min_rating")?;
            Some(rating)
        } else {
            None
        };

        let max_rating = if let Some(rating) = params.max_rating {
            Self::validate_rating(rating, "max_rating")?;
            Some(rating)
        } else {
            None
        };

        if let (Some(min), Some(max)) = (min_rating, max_rating) {
            if min > max {
                return Err(QueryError {
                    message: "min_rating cannot be greater than max_rating".to_string(),
                });
            }
        }

        let sort_field = if let Some(sort_str) = params.sort {
            Some(Self::parse_sort_field(&sort_str)?)
        } else {
            None
        };

        // Default order depends on sort field: best-rated and newest first
        let sort_order = if let Some(order_str) = params.order {
            Self::parse_sort_order(&order_str)?
        } else {
            match sort_field {
                Some(SortField::Rating) => SortOrder::Desc,
                Some(SortField::ReleaseDate) => SortOrder::Desc,
                None => SortOrder::Asc,
            }
        };

        let page = if let Some(p) = params.page {
            Self::validate_pagination_param(p, "page")?;
            p
        } else {
            1
        };

        let limit = if let Some(l) = params.limit {
            Self::validate_pagination_param(l, "limit")?;
            l
        } else {
            10
        };

        Ok(ValidatedQuery {
            search,
            genre,
            min_rating,
            max_rating,
            sort_field,
            sort_order,
            page,
            limit,
        })
    }

    /// Normalizes string parameters by trimming whitespace
    /// Returns None if the string is empty or whitespace-only
    fn normalize_string(s: Option<String>) -> Option<String> {
        s.and_then(|s| {
            let trimmed = s.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        })
    }

    /// Validates that a rating bound is within 0.0..=10.0 and finite
    fn validate_rating(rating: f64, param_name: &str) -> Result<(), QueryError> {
        if rating.is_nan() || rating.is_infinite() {
            return Err(QueryError {
                message: format!("{} must be a valid number", param_name),
            });
        }
        if crate::validation::validate_rating_range(rating).is_err() {
            return Err(QueryError {
                message: format!("{} must be between 0 and 10", param_name),
            });
        }
        Ok(())
    }

    /// Parses sort field string to SortField enum
    fn parse_sort_field(s: &str) -> Result<SortField, QueryError> {
        match s.to_lowercase().as_str() {
            "rating" => Ok(SortField::Rating),
            "rdate" => Ok(SortField::ReleaseDate),
            _ => Err(QueryError {
                message: format!("Invalid sort field '{}'. Must be 'rating' or 'rdate'", s),
            }),
        }
    }

    /// Parses sort order string to SortOrder enum
    fn parse_sort_order(s: &str) -> Result<SortOrder, QueryError> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(QueryError {
                message: format!("Invalid sort order '{}'. Must be 'asc' or 'desc'", s),
            }),
        }
    }

    /// Validates pagination parameters (page and limit), must be > 0
    fn validate_pagination_param(value: u32, param_name: &str) -> Result<(), QueryError> {
        if value == 0 {
            return Err(QueryError {
                message: format!("{} must be a positive number (greater than 0)", param_name),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_builder_basic_query() {
        let builder = SQLQueryBuilder::new();
        let (query, params) = builder.build();

        assert!(query.contains("SELECT * FROM movies"));
        assert!(query.contains("LIMIT"));
        assert!(query.contains("OFFSET"));
        assert_eq!(params.len(), 0);
    }

    #[test]
    fn test_sql_builder_with_search() {
        let mut builder = SQLQueryBuilder::new();
        builder.add_search_filter("inter");
        let (query, params) = builder.build();

        assert!(query.contains("WHERE"));
        assert!(query.contains("movie_name ILIKE $1"));
        assert_eq!(params[0], "%inter%");
    }

    #[test]
    fn test_sql_builder_with_genre_filter() {
        let mut builder = SQLQueryBuilder::new();
        builder.add_genre_filter("thriller");
        let (query, params) = builder.build();

        assert!(query.contains("genre ILIKE $1"));
        assert_eq!(params[0], "thriller");
    }

    #[test]
    fn test_sql_builder_with_rating_range() {
        let mut builder = SQLQueryBuilder::new();
        builder.add_rating_range(Some(6.0), Some(9.0));
        let (query, params) = builder.build();

        assert!(query.contains("rating >= $1"));
        assert!(query.contains("rating <= $2"));
        assert_eq!(params[0], "6");
        assert_eq!(params[1], "9");
    }

    #[test]
    fn test_sql_builder_with_sorting() {
        let mut builder = SQLQueryBuilder::new();
        builder.set_sort(SortField::Rating, SortOrder::Desc);
        let (query, _) = builder.build();

        assert!(query.contains("ORDER BY rating DESC"));
    }

    #[test]
    fn test_sql_builder_with_pagination() {
        let mut builder = SQLQueryBuilder::new();
        builder.set_pagination(3, 20);
        let (query, _params) = builder.build();

        assert!(query.contains("LIMIT 20"));
        assert!(query.contains("OFFSET 40"));
    }

    #[test]
    fn test_sql_builder_combined_filters() {
        let mut builder = SQLQueryBuilder::new();
        builder.add_search_filter("man");
        builder.add_genre_filter("action");
        builder.add_rating_range(Some(5.0), None);
        builder.set_sort(SortField::ReleaseDate, SortOrder::Desc);
        builder.set_pagination(1, 10);

        let (query, params) = builder.build();

        assert!(query.contains("movie_name ILIKE $1"));
        assert!(query.contains("AND"));
        assert!(query.contains("genre ILIKE $2"));
        assert!(query.contains("rating >= $3"));
        assert!(query.contains("ORDER BY rdate DESC"));

        assert_eq!(params[0], "%man%");
        assert_eq!(params[1], "action");
        assert_eq!(params[2], "5");
    }

    #[test]
    fn test_normalize_string_with_whitespace() {
        assert_eq!(
            QueryValidator::normalize_string(Some("  test  ".to_string())),
            Some("test".to_string())
        );
    }

    #[test]
    fn test_normalize_string_empty() {
        assert_eq!(QueryValidator::normalize_string(Some("   ".to_string())), None);
    }

    #[test]
    fn test_validate_rating_bounds() {
        assert!(QueryValidator::validate_rating(7.5, "min_rating").is_ok());
        assert!(QueryValidator::validate_rating(-1.0, "min_rating").is_err());
        assert!(QueryValidator::validate_rating(10.5, "max_rating").is_err());
        assert!(QueryValidator::validate_rating(f64::NAN, "min_rating").is_err());
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!(
            QueryValidator::parse_sort_field("rating").unwrap(),
            SortField::Rating
        );
        assert_eq!(
            QueryValidator::parse_sort_field("RDATE").unwrap(),
            SortField::ReleaseDate
        );
        assert!(QueryValidator::parse_sort_field("price").is_err());
    }

    #[test]
    fn test_parse_sort_order() {
        assert_eq!(QueryValidator::parse_sort_order("asc").unwrap(), SortOrder::Asc);
        assert_eq!(QueryValidator::parse_sort_order("DESC").unwrap(), SortOrder::Desc);
        assert!(QueryValidator::parse_sort_order("sideways").is_err());
    }

    #[test]
    fn test_validate_full_query_with_defaults() {
        let params = QueryParams {
            search: None,
            genre: None,
            min_rating: None,
            max_rating: None,
            sort: None,
            order: None,
            page: None,
            limit: None,
        };

        let validated = QueryValidator::validate(params).unwrap();
        assert_eq!(validated.page, 1);
        assert_eq!(validated.limit, 10);
        assert_eq!(validated.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_validate_rating_range_inverted() {
        let params = QueryParams {
            search: None,
            genre: None,
            min_rating: Some(9.0),
            max_rating: Some(5.0),
            sort: None,
            order: None,
            page: None,
            limit: None,
        };

        assert!(QueryValidator::validate(params).is_err());
    }

    #[test]
    fn test_validate_sort_defaults() {
        // Both rating and release-date sorts default to descending
        let params = QueryParams {
            search: None,
            genre: None,
            min_rating: None,
            max_rating: None,
            sort: Some("rating".to_string()),
            order: None,
            page: None,
            limit: None,
        };

        let validated = QueryValidator::validate(params).unwrap();
        assert_eq!(validated.sort_field, Some(SortField::Rating));
        assert_eq!(validated.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_validate_pagination_zero_rejected() {
        assert!(QueryValidator::validate_pagination_param(0, "page").is_err());
        assert!(QueryValidator::validate_pagination_param(1, "page").is_ok());
    }
}
