use crate::auth::CurrentUser;
use crate::models::{NewProperty, Property};
use crate::store::traits::{PropertyStore, StoreError, StoreResult};
use crate::store::types::FilterRequest;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_RANGE};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, warn};

const TABLE_PATH: &str = "/rest/v1/properties";
const CATALOG_ORDER: &str = "featured.desc,created_at.desc";

/// Property store backed by the Supabase REST (PostgREST) API
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseStore {
    /// Create a store against `base_url` using the public anon key for reads
    pub fn new(base_url: &str, anon_key: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}{}", self.base_url, TABLE_PATH)
    }

    fn auth_headers(&self, bearer: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(key) = HeaderValue::from_str(&self.anon_key) {
            headers.insert("apikey", key);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {bearer}")) {
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }
        headers
    }

    fn read(&self, request: RequestBuilder) -> RequestBuilder {
        request.headers(self.auth_headers(&self.anon_key))
    }

    async fn checked(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Supabase returned status: {}", status);
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// PostgREST query parameters for a catalog query
pub fn filter_params(filters: &FilterRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("select".to_string(), "*".to_string()),
        ("order".to_string(), CATALOG_ORDER.to_string()),
    ];

    if let Some(kind) = filters.listing_type {
        params.push(("type".to_string(), format!("eq.{}", kind.as_str())));
    }

    if let Some(search) = filters.search_text() {
        let pattern = quote_value(&format!("*{}*", escape_like(search)));
        params.push((
            "or".to_string(),
            format!("(title.ilike.{pattern},location.ilike.{pattern})"),
        ));
    }

    if let Some(range) = filters.price_range {
        let (min, max) = range.bounds();
        if let Some(min) = min {
            params.push(("price".to_string(), format!("gte.{min}")));
        }
        if let Some(max) = max {
            params.push(("price".to_string(), format!("lte.{max}")));
        }
    }

    params
}

/// Escape LIKE metacharacters so the search text matches literally.
///
/// PostgREST rewrites every `*` into `%`, so a literal `*` cannot be sent;
/// it goes out as the single-character `_` and rows are re-checked locally.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            '*' => out.push('_'),
            _ => out.push(c),
        }
    }
    out
}

/// Double-quote a PostgREST filter value so `,` `(` `)` stay literal
fn quote_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Total from a `Content-Range` header such as `0-5/6` or `*/0`
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

#[async_trait]
impl PropertyStore for SupabaseStore {
    async fn list(&self, filters: &FilterRequest) -> StoreResult<Vec<Property>> {
        let params = filter_params(filters);
        debug!("Querying properties with {:?}", params);

        let response = self
            .read(self.client.get(self.table_url()))
            .query(&params)
            .send()
            .await?;
        let response = Self::checked(response).await?;

        let body = response.text().await?;
        let mut rows: Vec<Property> = serde_json::from_str(&body)?;
        if filters.search_text().is_some_and(|s| s.contains('*')) {
            rows.retain(|p| filters.matches(p));
        }
        Ok(rows)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Property>> {
        let response = self
            .read(self.client.get(self.table_url()))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{id}"))])
            .send()
            .await?;
        let response = Self::checked(response).await?;

        let body = response.text().await?;
        let rows: Vec<Property> = serde_json::from_str(&body)?;
        Ok(rows.into_iter().next())
    }

    async fn count(&self) -> StoreResult<u64> {
        let response = self
            .read(self.client.head(self.table_url()))
            .query(&[("select", "*")])
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = Self::checked(response).await?;

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or(StoreError::MissingCount)
    }

    async fn insert(&self, new: &NewProperty, user: &CurrentUser) -> StoreResult<Property> {
        let response = self
            .client
            .post(self.table_url())
            .headers(self.auth_headers(&user.access_token))
            .header("Prefer", "return=representation")
            .json(new)
            .send()
            .await?;
        let response = Self::checked(response).await?;

        let body = response.text().await?;
        let rows: Vec<Property> = serde_json::from_str(&body)?;
        rows.into_iter().next().ok_or(StoreError::EmptyInsert)
    }

    fn backend_name(&self) -> &'static str {
        "supabase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingType;
    use crate::store::types::PriceRange;

    fn value_of<'a>(params: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_unfiltered_query_is_always_ordered() {
        let params = filter_params(&FilterRequest::default());
        assert_eq!(value_of(&params, "order"), vec!["featured.desc,created_at.desc"]);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_type_and_range_params() {
        let params = filter_params(&FilterRequest {
            listing_type: Some(ListingType::Rental),
            price_range: Some(PriceRange::From100kTo300k),
            ..Default::default()
        });
        assert_eq!(value_of(&params, "type"), vec!["eq.Alquiler"]);
        assert_eq!(value_of(&params, "price"), vec!["gte.100000", "lte.300000"]);
    }

    #[test]
    fn test_search_becomes_quoted_or_filter() {
        let params = filter_params(&FilterRequest {
            search: Some(" Punta, Cana ".to_string()),
            ..Default::default()
        });
        assert_eq!(
            value_of(&params, "or"),
            vec![r#"(title.ilike."*Punta, Cana*",location.ilike."*Punta, Cana*")"#]
        );
    }

    #[test]
    fn test_search_escapes_like_wildcards() {
        let params = filter_params(&FilterRequest {
            search: Some("100%".to_string()),
            ..Default::default()
        });
        assert!(value_of(&params, "or")[0].contains(r#""*100\\%*""#));
    }

    #[test]
    fn test_search_sends_star_as_single_char_wildcard() {
        let params = filter_params(&FilterRequest {
            search: Some("Villa*".to_string()),
            ..Default::default()
        });
        assert_eq!(
            value_of(&params, "or"),
            vec![r#"(title.ilike."*Villa_*",location.ilike."*Villa_*")"#]
        );
    }

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-5/6"), Some(6));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-5/*"), None);
    }
}
