use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::entities::{
    Appearance, Biography, Connections, Hero, HeroId, HeroName, Image, PowerStats, RawHero,
    StatValue, Work,
};
use crate::ports::{HeroLookup, LookupError};

fn stat(value: Option<i32>) -> StatValue {
    value.map_or(StatValue::Unknown, StatValue::Known)
}

/// Stats in the order intelligence, strength, speed, durability, power, combat.
pub fn hero_with_stats(id: i32, name: &str, stats: [Option<i32>; 6]) -> Hero {
    let [intelligence, strength, speed, durability, power, combat] = stats;
    Hero {
        id: HeroId::from(id),
        name: name.to_string(),
        powerstats: PowerStats {
            intelligence: stat(intelligence),
            strength: stat(strength),
            speed: stat(speed),
            durability: stat(durability),
            power: stat(power),
            combat: stat(combat),
        },
        biography: Biography {
            full_name: name.to_string(),
            alter_egos: "No alter egos found.".to_string(),
            aliases: vec!["-".to_string()],
            place_of_birth: "-".to_string(),
            first_appearance: "-".to_string(),
            publisher: "DC Comics".to_string(),
            alignment: "good".to_string(),
        },
        appearance: Appearance {
            gender: "Male".to_string(),
            race: "Human".to_string(),
            height: vec!["6'2".to_string(), "188 cm".to_string()],
            weight: vec!["210 lb".to_string(), "95 kg".to_string()],
            eye_color: "Blue".to_string(),
            hair_color: "Black".to_string(),
        },
        work: Work {
            occupation: "-".to_string(),
            base: "Gotham City".to_string(),
        },
        connections: Connections {
            group_affiliation: "Justice League".to_string(),
            relatives: "-".to_string(),
        },
        image: Image {
            url: Url::parse(&format!(
                "https://www.superherodb.com/pictures2/portraits/10/100/{}.jpg",
                id
            ))
            .unwrap(),
        },
    }
}

pub fn batman_beyond(id: i32) -> Hero {
    hero_with_stats(
        id,
        "Batman",
        [Some(81), Some(40), Some(29), Some(55), Some(63), Some(90)],
    )
}

/// `HeroLookup` that answers every search with the same result and records the names asked for.
#[derive(Debug)]
pub struct ScriptedLookup {
    result: Result<Vec<RawHero>, LookupError>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    pub fn raw(result: Result<Vec<RawHero>, LookupError>) -> Self {
        Self {
            result,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn found(heroes: impl IntoIterator<Item = Hero>) -> Self {
        Self::raw(Ok(heroes.into_iter().map(RawHero::from).collect()))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HeroLookup for ScriptedLookup {
    type Error = anyhow::Error;

    async fn search(&self, name: &HeroName) -> anyhow::Result<Result<Vec<RawHero>, LookupError>> {
        self.calls.lock().unwrap().push(name.to_string());
        Ok(self.result.clone())
    }
}
