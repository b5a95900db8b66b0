use crate::core::ids::{ApporteurId, ClientId, CollaborateurId};
use serde::{Deserialize, Serialize};

/// A client the business runs missions for.
///
/// Reference entities carry nothing the engines compute with: their id
/// is a join key and their name is a display label for aggregation
/// output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub nom: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// A referral partner (apporteur d'affaires) entitled to a commission
/// on missions they introduced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apporteur {
    pub id: ApporteurId,
    pub nom: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// An internal team member entitled to a percentage share of mission
/// proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborateur {
    pub id: CollaborateurId,
    pub nom: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_json_shape() {
        let client = Client {
            id: ClientId::new("acme"),
            nom: "ACME SARL".to_string(),
            note: None,
        };
        let json = serde_json::to_string(&client).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "acme");
        assert_eq!(value["nom"], "ACME SARL");
    }

    #[test]
    fn test_note_defaults_to_none() {
        let parsed: Collaborateur =
            serde_json::from_str(r#"{"id": "fred", "nom": "Fred"}"#).unwrap();
        assert_eq!(parsed.note, None);
    }
}
