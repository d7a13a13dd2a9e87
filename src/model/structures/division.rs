use std::{collections::HashMap, fmt};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::{gender::Gender, sport::Sport};

lazy_static! {
    /// Weight classes offered per sport and gender
    static ref WEIGHT_CLASSES: HashMap<(Sport, Gender), Vec<&'static str>> = {
        let mut m = HashMap::new();
        m.insert(
            (Sport::Mma, Gender::Men),
            vec![
                "Flyweight (125)",
                "Bantamweight (135)",
                "Featherweight (145)",
                "Lightweight (155)",
                "Welterweight (170)",
                "Middleweight (185)",
                "Light Heavyweight (205)",
                "Heavyweight (265)"
            ]
        );
        m.insert(
            (Sport::Mma, Gender::Women),
            vec!["Strawweight (115)", "Flyweight (125)", "Bantamweight (135)", "Featherweight (145)"]
        );
        m.insert(
            (Sport::Kickboxing, Gender::Men),
            vec![
                "125 lbs",
                "135 lbs",
                "145 lbs",
                "155 lbs",
                "170 lbs",
                "185 lbs",
                "205 lbs",
                "Heavyweight"
            ]
        );
        m.insert((Sport::Kickboxing, Gender::Women), vec!["115 lbs", "125 lbs", "135 lbs", "145 lbs"]);
        m.insert((Sport::Grappling, Gender::Men), vec!["Light", "Middle", "Heavy"]);
        m.insert((Sport::Grappling, Gender::Women), vec!["Light", "Middle", "Heavy"]);
        m.insert(
            (Sport::BareKnuckleBoxing, Gender::Men),
            vec!["135", "145", "155", "175", "205", "HVY"]
        );
        m.insert((Sport::BareKnuckleBoxing, Gender::Women), vec!["125", "135", "145"]);
        m
    };
}

/// The unit of rank isolation: (sport, gender, weight class).
///
/// Weight class labels are compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub sport: Sport,
    pub gender: Gender,
    pub weight_class: String
}

impl Division {
    pub fn new(sport: Sport, gender: Gender, weight_class: impl Into<String>) -> Division {
        Division {
            sport,
            gender,
            weight_class: weight_class.into()
        }
    }

    /// Whether the weight class is one the sport offers for this gender
    pub fn is_recognized(&self) -> bool {
        weight_classes(self.sport, self.gender).contains(&self.weight_class.as_str())
    }

    /// Every division in the catalog, in sport, gender, then weight order
    pub fn recognized() -> Vec<Division> {
        let mut divisions = Vec::new();
        for sport in Sport::iter() {
            for gender in Gender::iter() {
                for weight_class in weight_classes(sport, gender) {
                    divisions.push(Division::new(sport, gender, *weight_class));
                }
            }
        }

        divisions
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.sport, self.gender, self.weight_class)
    }
}

pub fn weight_classes(sport: Sport, gender: Gender) -> &'static [&'static str] {
    WEIGHT_CLASSES
        .get(&(sport, gender))
        .map(|classes| classes.as_slice())
        .unwrap_or(&[])
}
