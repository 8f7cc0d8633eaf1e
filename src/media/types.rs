//! Upstream JSON payloads.
//!
//! Every field is optional on the wire, lists default to empty. The server
//! sends `null` as often as it leaves a field out, both read as the default.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "Type")]
    pub item_type: Option<String>,
    pub collection_type: Option<String>,
    pub overview: Option<String>,
    pub production_year: Option<i32>,
    pub official_rating: Option<String>,
    pub community_rating: Option<f64>,
    pub run_time_ticks: Option<i64>,
    pub series_name: Option<String>,
    pub season_name: Option<String>,
    pub parent_index_number: Option<u32>,
    pub index_number: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<MediaItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_record_count: usize,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPolicy {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_administrator: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub server_name: Option<String>,
    pub last_login_date: Option<String>,
    pub last_activity_date: Option<String>,
    pub policy: Option<UserPolicy>,
}

/// Response of `POST /Users/AuthenticateByName`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_token: String,
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let list: ItemList = serde_json::from_str("{}").unwrap();
        assert!(list.items.is_empty());
        assert_eq!(0, list.total_record_count);

        let item: MediaItem = serde_json::from_str(r#"{"Name":"Alien"}"#).unwrap();
        assert_eq!("Alien", item.name);
        assert!(item.id.is_empty());
        assert!(item.genres.is_empty());
        assert!(item.production_year.is_none());
    }

    #[test]
    fn null_fields_default() {
        let list: ItemList =
            serde_json::from_str(r#"{"Items":null,"TotalRecordCount":null}"#).unwrap();
        assert!(list.items.is_empty());
        assert_eq!(0, list.total_record_count);

        let item: MediaItem =
            serde_json::from_str(r#"{"Id":"m1","Name":null,"Genres":null,"Overview":null}"#)
                .unwrap();
        assert_eq!("m1", item.id);
        assert!(item.name.is_empty());
        assert!(item.genres.is_empty());
        assert!(item.overview.is_none());

        let user: User =
            serde_json::from_str(r#"{"Id":null,"Name":null,"Policy":{"IsAdministrator":null}}"#)
                .unwrap();
        assert!(user.id.is_empty());
        assert!(!user.policy.unwrap().is_administrator);

        let result: AuthenticationResult =
            serde_json::from_str(r#"{"AccessToken":null,"User":null}"#).unwrap();
        assert!(result.access_token.is_empty());
        assert!(result.user.is_none());
    }

    #[test]
    fn item_type_is_renamed() {
        let item: MediaItem = serde_json::from_str(
            r#"{"Id":"e1","Type":"Episode","ParentIndexNumber":1,"IndexNumber":2}"#,
        )
        .unwrap();
        assert_eq!(Some("Episode"), item.item_type.as_deref());
        assert_eq!(Some(1), item.parent_index_number);
        assert_eq!(Some(2), item.index_number);
    }

    #[test]
    fn authentication_result() {
        let result: AuthenticationResult = serde_json::from_str(
            r#"{"AccessToken":"tok1","User":{"Id":"u1","Name":"alice"},"ServerId":"s"}"#,
        )
        .unwrap();
        assert_eq!("tok1", result.access_token);
        assert_eq!("u1", result.user.unwrap().id);
    }
}
