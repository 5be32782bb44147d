use crate::catalog::PestDatabase;
use crate::models::{PestProfile, PestQuery};

/// Pests whose season, soil and weather bands all cover the query.
/// An empty result means no major pest pressure is expected.
pub fn predict_pests<'a>(db: &'a PestDatabase, query: &PestQuery) -> Vec<&'a PestProfile> {
    let matches: Vec<&PestProfile> = db.entries().iter().filter(|p| p.matches(query)).collect();
    tracing::debug!(
        "{} pest(s) predicted for {} ({} / {}, {:.1}C, {:.0}% RH)",
        matches.len(),
        query.crop,
        query.season,
        query.soil,
        query.temp_c,
        query.humidity_pct
    );
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(crop: &str, season: &str, soil: &str, temp_c: f64, humidity_pct: f64) -> PestQuery {
        PestQuery {
            crop: crop.into(),
            season: season.into(),
            soil: soil.into(),
            temp_c,
            humidity_pct,
        }
    }

    #[test]
    fn wheat_in_cool_humid_rabi() {
        let db = PestDatabase::embedded().unwrap();
        // 20C / 75% sits in both the Aphids and Rust bands
        let pests: Vec<&str> = predict_pests(&db, &query("Wheat", "Rabi", "Loamy", 20.0, 75.0))
            .iter()
            .map(|p| p.pest.as_str())
            .collect();
        assert_eq!(pests, vec!["Aphids", "Rust"]);
    }

    #[test]
    fn bands_are_inclusive() {
        let db = PestDatabase::embedded().unwrap();
        let pests = predict_pests(&db, &query("Rice", "Kharif", "Clay", 28.0, 80.0));
        let names: Vec<&str> = pests.iter().map(|p| p.pest.as_str()).collect();
        assert_eq!(names, vec!["Brown Planthopper", "Rice Blast"]);
    }

    #[test]
    fn matching_ignores_case() {
        let db = PestDatabase::embedded().unwrap();
        let pests = predict_pests(&db, &query("tomato", "KHARIF", "sandy", 25.0, 70.0));
        assert_eq!(pests.len(), 1);
        assert_eq!(pests[0].pest, "Leaf Miner");
    }

    #[test]
    fn wrong_season_or_soil_predicts_nothing() {
        let db = PestDatabase::embedded().unwrap();
        assert!(predict_pests(&db, &query("Wheat", "Kharif", "Loamy", 20.0, 75.0)).is_empty());
        assert!(predict_pests(&db, &query("Wheat", "Rabi", "Sandy", 20.0, 75.0)).is_empty());
    }

    #[test]
    fn dry_weather_predicts_nothing() {
        let db = PestDatabase::embedded().unwrap();
        assert!(predict_pests(&db, &query("Tomato", "Rabi", "Sandy", 22.0, 40.0)).is_empty());
    }
}
