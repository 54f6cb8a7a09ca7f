//! Shared record builders for integration tests.

use roster_business::{Address, Company, UserRecord};

/// A record with the given name/city/company; remaining fields derived.
pub fn user(id: u64, name: &str, city: Option<&str>, company: &str) -> UserRecord {
    let username = name.to_lowercase().replace(' ', ".");
    UserRecord {
        id,
        name: name.to_owned(),
        email: format!("{username}@example.com"),
        username,
        phone: format!("555-010{id}"),
        website: "example.com".to_owned(),
        company: (!company.is_empty()).then(|| Company {
            name: company.to_owned(),
            catch_phrase: "Synergize scalable paradigms".to_owned(),
        }),
        address: Address {
            street: "1 Main St".to_owned(),
            suite: format!("Apt. {id}"),
            city: city.map(str::to_owned),
            zipcode: "00000".to_owned(),
        },
    }
}
