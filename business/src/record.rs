//! Directory record types, mirroring the remote `/users` payload.

use serde::{Deserialize, Serialize};

/// One directory entry: a person with contact and employer fields.
///
/// Records are immutable once fetched; all textual fields are strings per
/// the data-source contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique, stable identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    #[serde(default)]
    pub company: Option<Company>,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase", default)]
    pub catch_phrase: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    #[serde(default)]
    pub suite: String,
    /// May be absent in the payload.
    #[serde(default)]
    pub city: Option<String>,
    pub zipcode: String,
}

impl UserRecord {
    /// Employer name, or empty when the record has no company.
    pub fn company_name(&self) -> &str {
        self.company.as_ref().map_or("", |company| company.name.as_str())
    }

    pub fn city(&self) -> Option<&str> {
        self.address.city.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_remote_payload_shape() {
        let payload = serde_json::json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            },
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            }
        });

        let record: UserRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(record.name, "Leanne Graham");
        assert_eq!(record.company_name(), "Romaguera-Crona");
        assert_eq!(record.city(), Some("Gwenborough"));
    }

    #[test]
    fn test_company_and_city_may_be_absent() {
        let payload = serde_json::json!({
            "id": 2,
            "name": "Ervin Howell",
            "username": "Antonette",
            "email": "Shanna@melissa.tv",
            "phone": "010-692-6593 x09125",
            "website": "anastasia.net",
            "address": {
                "street": "Victor Plains",
                "zipcode": "90566-7771"
            }
        });

        let record: UserRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(record.company_name(), "");
        assert_eq!(record.city(), None);
        assert_eq!(record.address.suite, "");
    }
}
