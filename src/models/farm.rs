use super::climate::ClimateEstimate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
    Perennial,
    Other(String),
}

impl Season {
    pub fn as_str(&self) -> &str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
            Season::Perennial => "Perennial",
            Season::Other(label) => label,
        }
    }

    /// Parse a season label. Unknown labels are kept verbatim as `Other`.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "kharif" | "monsoon" => Season::Kharif,
            "rabi" | "winter" => Season::Rabi,
            "zaid" => Season::Zaid,
            "perennial" => Season::Perennial,
            _ => Season::Other(trimmed.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Season::Other(_))
    }
}

impl From<String> for Season {
    fn from(s: String) -> Self {
        Season::parse(&s)
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.as_str().to_string()
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    Hectare,
    Acre,
    SquareMeter,
    Bigha,
    Guntha,
    Ground,
}

impl AreaUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaUnit::Hectare => "hectare",
            AreaUnit::Acre => "acre",
            AreaUnit::SquareMeter => "square_meter",
            AreaUnit::Bigha => "bigha",
            AreaUnit::Guntha => "guntha",
            AreaUnit::Ground => "ground",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hectare" | "hectares" | "ha" => Some(AreaUnit::Hectare),
            "acre" | "acres" => Some(AreaUnit::Acre),
            "square_meter" | "square meter" | "sqm" => Some(AreaUnit::SquareMeter),
            "bigha" => Some(AreaUnit::Bigha),
            "guntha" => Some(AreaUnit::Guntha),
            "ground" => Some(AreaUnit::Ground),
            _ => None,
        }
    }

    /// Hectares in one of this unit. Bigha is the common north-Indian measure.
    pub fn hectares_per_unit(&self) -> f64 {
        match self {
            AreaUnit::Hectare => 1.0,
            AreaUnit::Acre => 0.404686,
            AreaUnit::SquareMeter => 0.0001,
            AreaUnit::Bigha => 0.133333,
            AreaUnit::Guntha => 0.025,
            AreaUnit::Ground => 0.0025,
        }
    }

    pub fn all() -> &'static [AreaUnit] {
        &[
            AreaUnit::Hectare,
            AreaUnit::Acre,
            AreaUnit::SquareMeter,
            AreaUnit::Bigha,
            AreaUnit::Guntha,
            AreaUnit::Ground,
        ]
    }
}

impl std::fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of converting a `(value, unit)` pair to hectares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaConversion {
    pub hectares: f64,
    /// `None` when the unit string was not recognized and the value was taken as hectares.
    pub unit: Option<AreaUnit>,
}

impl AreaConversion {
    pub fn is_fallback(&self) -> bool {
        self.unit.is_none()
    }
}

pub fn to_hectares(value: f64, unit: &str) -> AreaConversion {
    let parsed = AreaUnit::from_str(unit);
    let multiplier = parsed.map(|u| u.hectares_per_unit()).unwrap_or(1.0);
    AreaConversion {
        hectares: value * multiplier,
        unit: parsed,
    }
}

const SOIL_SYNONYMS: &[(&str, &str)] = &[
    ("sandy", "Sandy"),
    ("loamy", "Loamy"),
    ("loam", "Loamy"),
    ("clay", "Clay"),
    ("clayey", "Clay"),
    ("silty", "Silty"),
    ("peaty", "Peaty"),
    ("chalky", "Chalky"),
    ("alluvial", "Alluvial"),
    ("red", "Red"),
    ("black", "Black"),
    ("laterite", "Laterite"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoilLabel {
    pub label: String,
    pub recognized: bool,
}

/// Map free-form soil input onto the catalog's capitalized vocabulary.
/// Unknown input is title-cased and flagged as unrecognized.
pub fn normalize_soil(input: &str) -> SoilLabel {
    let key = input.trim().to_lowercase();
    match SOIL_SYNONYMS.iter().find(|(k, _)| *k == key) {
        Some((_, canonical)) => SoilLabel {
            label: canonical.to_string(),
            recognized: true,
        },
        None => SoilLabel {
            label: title_case(input.trim()),
            recognized: false,
        },
    }
}

pub fn known_soils() -> Vec<&'static str> {
    let mut soils: Vec<&'static str> = SOIL_SYNONYMS.iter().map(|(_, c)| *c).collect();
    soils.dedup();
    soils
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// A silent normalization fallback made while building `FarmConditions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputFallback {
    UnknownSoil { input: String, used: String },
    UnknownAreaUnit { input: String },
    ClimateDefaulted { temperature: bool, rainfall: bool },
}

impl std::fmt::Display for InputFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFallback::UnknownSoil { input, used } => {
                write!(f, "soil '{}' not recognized, matched as '{}'", input, used)
            }
            InputFallback::UnknownAreaUnit { input } => {
                write!(f, "unit '{}' not recognized, area taken as hectares", input)
            }
            InputFallback::ClimateDefaulted {
                temperature,
                rainfall,
            } => {
                let mut parts = Vec::new();
                if *temperature {
                    parts.push("temperature");
                }
                if *rainfall {
                    parts.push("rainfall");
                }
                write!(f, "default climate used for {}", parts.join(" and "))
            }
        }
    }
}

/// Raw, user-entered farm details before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmInputs {
    pub soil: String,
    pub season: String,
    pub area: f64,
    pub unit: String,
    pub has_irrigation: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FarmConditions {
    pub soil: String,
    pub season: Season,
    pub has_irrigation: bool,
    pub avg_temp_c: Option<f64>,
    pub annual_rain_mm: Option<f64>,
    pub area_hectares: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<InputFallback>,
}

impl FarmConditions {
    pub fn new(soil: impl Into<String>, season: Season, area_hectares: f64) -> Self {
        Self {
            soil: soil.into(),
            season,
            has_irrigation: false,
            avg_temp_c: None,
            annual_rain_mm: None,
            area_hectares,
            fallbacks: Vec::new(),
        }
    }

    /// Normalize raw inputs, recording every silent fallback taken.
    pub fn from_inputs(inputs: &FarmInputs) -> Self {
        let soil = normalize_soil(&inputs.soil);
        let area = to_hectares(inputs.area, &inputs.unit);

        let season = Season::parse(&inputs.season);
        let mut conditions = Self::new(soil.label.clone(), season, area.hectares)
            .with_irrigation(inputs.has_irrigation);

        if !soil.recognized {
            tracing::debug!("Unrecognized soil '{}', using '{}'", inputs.soil, soil.label);
            conditions.fallbacks.push(InputFallback::UnknownSoil {
                input: inputs.soil.clone(),
                used: soil.label,
            });
        }
        if !conditions.season.is_known() {
            tracing::debug!(
                "Unrecognized season '{}', only perennial crops will match",
                inputs.season
            );
        }
        if area.is_fallback() {
            tracing::debug!(
                "Unrecognized area unit '{}', assuming hectares",
                inputs.unit
            );
            conditions.fallbacks.push(InputFallback::UnknownAreaUnit {
                input: inputs.unit.clone(),
            });
        }

        conditions
    }

    pub fn with_irrigation(mut self, has_irrigation: bool) -> Self {
        self.has_irrigation = has_irrigation;
        self
    }

    /// Take measurements from a climate estimate as-is; absent values stay absent.
    pub fn with_climate(mut self, climate: &ClimateEstimate) -> Self {
        self.avg_temp_c = climate.avg_temp_c;
        self.annual_rain_mm = climate.annual_rain_mm;
        self
    }

    /// Take measurements from a climate estimate, filling gaps with season defaults.
    pub fn with_resolved_climate(self, climate: &ClimateEstimate) -> Self {
        let temperature = climate.avg_temp_c.is_none();
        let rainfall = climate.annual_rain_mm.is_none();
        let resolved = climate.with_defaults(&self.season);
        let mut conditions = self.with_climate(&resolved);
        if temperature || rainfall {
            conditions.fallbacks.push(InputFallback::ClimateDefaulted {
                temperature,
                rainfall,
            });
        }
        conditions
    }
}

#[cfg(test)]
impl FarmConditions {
    pub fn with_avg_temp(mut self, temp_c: f64) -> Self {
        self.avg_temp_c = Some(temp_c);
        self
    }

    pub fn with_annual_rain(mut self, rain_mm: f64) -> Self {
        self.annual_rain_mm = Some(rain_mm);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acre_conversion_is_linear() {
        for x in [0.5, 1.0, 2.5, 100.0] {
            let conv = to_hectares(x, "acre");
            assert!((conv.hectares - x * 0.404686).abs() < 1e-12);
            assert_eq!(conv.unit, Some(AreaUnit::Acre));
        }
    }

    #[test]
    fn unit_conversion_table() {
        assert!((to_hectares(1.0, "hectare").hectares - 1.0).abs() < 1e-12);
        assert!((to_hectares(10_000.0, "square_meter").hectares - 1.0).abs() < 1e-9);
        assert!((to_hectares(10_000.0, "square meter").hectares - 1.0).abs() < 1e-9);
        assert!((to_hectares(3.0, "bigha").hectares - 0.399999).abs() < 1e-9);
        assert!((to_hectares(40.0, "guntha").hectares - 1.0).abs() < 1e-9);
        assert!((to_hectares(400.0, "ground").hectares - 1.0).abs() < 1e-9);
        assert!((to_hectares(2.0, "ACRE").hectares - 0.809372).abs() < 1e-9);
    }

    #[test]
    fn unknown_unit_falls_back_to_hectares() {
        let conv = to_hectares(3.0, "furlong");
        assert_eq!(conv.hectares, 3.0);
        assert!(conv.is_fallback());
    }

    #[test]
    fn area_unit_round_trip() {
        for unit in AreaUnit::all() {
            assert_eq!(AreaUnit::from_str(unit.as_str()), Some(*unit));
        }
    }

    #[test]
    fn soil_synonyms_normalize() {
        assert_eq!(normalize_soil("  sandy ").label, "Sandy");
        assert_eq!(normalize_soil("LOAMY").label, "Loamy");
        assert_eq!(normalize_soil("loam").label, "Loamy");
        assert_eq!(normalize_soil("Clayey").label, "Clay");
        assert!(normalize_soil("laterite").recognized);
    }

    #[test]
    fn unknown_soil_is_title_cased_and_flagged() {
        let soil = normalize_soil("  volcanic ash ");
        assert_eq!(soil.label, "Volcanic Ash");
        assert!(!soil.recognized);
    }

    #[test]
    fn season_parse() {
        assert_eq!(Season::parse("kharif"), Season::Kharif);
        assert_eq!(Season::parse("Monsoon"), Season::Kharif);
        assert_eq!(Season::parse("RABI"), Season::Rabi);
        assert_eq!(Season::parse("winter"), Season::Rabi);
        assert_eq!(Season::parse("Zaid"), Season::Zaid);
        assert_eq!(Season::parse("perennial"), Season::Perennial);
        assert_eq!(Season::parse(" Autumn "), Season::Other("Autumn".into()));
        assert!(!Season::parse("Autumn").is_known());
    }

    #[test]
    fn from_inputs_records_fallbacks() {
        let inputs = FarmInputs {
            soil: "gravel".into(),
            season: "Kharif".into(),
            area: 2.0,
            unit: "cubit".into(),
            has_irrigation: true,
        };
        let conditions = FarmConditions::from_inputs(&inputs);
        assert_eq!(conditions.soil, "Gravel");
        assert_eq!(conditions.area_hectares, 2.0);
        assert!(conditions.has_irrigation);
        assert_eq!(conditions.fallbacks.len(), 2);
        assert!(matches!(
            conditions.fallbacks[0],
            InputFallback::UnknownSoil { .. }
        ));
        assert!(matches!(
            conditions.fallbacks[1],
            InputFallback::UnknownAreaUnit { .. }
        ));
    }

    #[test]
    fn from_inputs_clean() {
        let inputs = FarmInputs {
            soil: "alluvial".into(),
            season: "rabi".into(),
            area: 1.0,
            unit: "acre".into(),
            has_irrigation: false,
        };
        let conditions = FarmConditions::from_inputs(&inputs);
        assert_eq!(conditions.soil, "Alluvial");
        assert_eq!(conditions.season, Season::Rabi);
        assert!((conditions.area_hectares - 0.404686).abs() < 1e-12);
        assert!(conditions.fallbacks.is_empty());
    }

    #[test]
    fn resolved_climate_marks_defaults() {
        let conditions = FarmConditions::new("Loamy", Season::Rabi, 1.0)
            .with_resolved_climate(&ClimateEstimate::absent());
        assert_eq!(conditions.avg_temp_c, Some(25.0));
        assert_eq!(conditions.annual_rain_mm, Some(500.0));
        assert_eq!(
            conditions.fallbacks,
            vec![InputFallback::ClimateDefaulted {
                temperature: true,
                rainfall: true
            }]
        );
    }

    #[test]
    fn resolved_climate_keeps_measurements() {
        let climate = ClimateEstimate::manual(Some(31.0), Some(1200.0));
        let conditions =
            FarmConditions::new("Loamy", Season::Kharif, 1.0).with_resolved_climate(&climate);
        assert_eq!(conditions.avg_temp_c, Some(31.0));
        assert_eq!(conditions.annual_rain_mm, Some(1200.0));
        assert!(conditions.fallbacks.is_empty());
    }
}
