use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biography {
    #[serde(rename = "full-name")]
    pub full_name: String,
    #[serde(rename = "alter-egos")]
    pub alter_egos: String,
    pub aliases: Vec<String>,
    #[serde(rename = "place-of-birth")]
    pub place_of_birth: String,
    #[serde(rename = "first-appearance")]
    pub first_appearance: String,
    pub publisher: String,
    pub alignment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub gender: String,
    pub race: String,
    pub height: Vec<String>,
    pub weight: Vec<String>,
    #[serde(rename = "eye-color")]
    pub eye_color: String,
    #[serde(rename = "hair-color")]
    pub hair_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    pub occupation: String,
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connections {
    #[serde(rename = "group-affiliation")]
    pub group_affiliation: String,
    pub relatives: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: Url,
}
