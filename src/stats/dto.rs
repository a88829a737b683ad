use serde::{Deserialize, Serialize};

use super::filters::first_non_empty;

/// Generic success envelope for statistics responses.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

// ---- urgente ----

#[derive(Debug, Deserialize)]
pub struct EmergencyRequest {
    pub urgente_an: Option<i32>,
    pub urgente_drog: Option<String>,
    pub urgente_filtru: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmergencyRow {
    pub label: String,
    pub drog: &'static str,
    pub cantitate: Option<f64>,
    pub filtru: String,
    pub an: i32,
}

#[derive(Debug, Deserialize)]
pub struct EmergencyIntervalRequest {
    #[serde(rename = "startYear")]
    pub start_year: Option<i32>,
    #[serde(rename = "endYear")]
    pub end_year: Option<i32>,
    pub urgente_drog: Option<String>,
    #[serde(default)]
    pub gen_filtru: Option<String>,
    #[serde(default)]
    pub consum_filtru: Option<String>,
    #[serde(default)]
    pub diagnostic_filtru: Option<String>,
    #[serde(default)]
    pub varsta_filtru: Option<String>,
    #[serde(default)]
    pub administrare_filtru: Option<String>,
}

impl EmergencyIntervalRequest {
    /// Fixed priority order: gen, consum, diagnostic, varsta, administrare.
    pub fn active_filter(&self) -> Option<&str> {
        first_non_empty(&[
            &self.gen_filtru,
            &self.consum_filtru,
            &self.diagnostic_filtru,
            &self.varsta_filtru,
            &self.administrare_filtru,
        ])
    }
}

#[derive(Debug, Serialize)]
pub struct EmergencyIntervalRow {
    pub label: i32,
    pub cantitate: Option<f64>,
    pub categorie: Option<String>,
    pub drog: &'static str,
    pub filtru: String,
}

// ---- confiscari ----

#[derive(Debug, Deserialize)]
pub struct SeizureIntervalRequest {
    #[serde(rename = "startYearConfiscari")]
    pub start_year: Option<i32>,
    #[serde(rename = "endYearConfiscari")]
    pub end_year: Option<i32>,
    pub drog: Option<String>,
    pub confiscari_subcategorie: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SeizureRow {
    pub label: i32,
    pub cantitate: Option<i64>,
    pub filtru: &'static str,
    pub drog: String,
}

// ---- infractiuni ----

#[derive(Debug, Deserialize)]
pub struct OffenceIntervalRequest {
    #[serde(rename = "startYearInfractiuni")]
    pub start_year: Option<i32>,
    #[serde(rename = "endYearInfractiuni")]
    pub end_year: Option<i32>,
    pub infractiuni_categorie: Option<String>,
    #[serde(default)]
    pub incadrare_filtru_infractiuni: Option<String>,
    #[serde(default)]
    pub cercetari_filtru_infractiuni: Option<String>,
    #[serde(default)]
    pub gen_filtru_infractiuni: Option<String>,
    #[serde(default)]
    pub grupari_filtru_infractiuni: Option<String>,
    #[serde(default)]
    pub pedepse_filtru_infractiuni: Option<String>,
    #[serde(default)]
    pub varsta_filtru_infractiuni: Option<String>,
    #[serde(default)]
    pub lege_filtru_infractiuni: Option<String>,
}

impl OffenceIntervalRequest {
    /// Fixed priority order: incadrare, cercetari, gen, grupari, pedepse.
    pub fn primary_filter(&self) -> Option<&str> {
        first_non_empty(&[
            &self.incadrare_filtru_infractiuni,
            &self.cercetari_filtru_infractiuni,
            &self.gen_filtru_infractiuni,
            &self.grupari_filtru_infractiuni,
            &self.pedepse_filtru_infractiuni,
        ])
    }

    /// Fixed priority order: varsta, lege.
    pub fn secondary_filter(&self) -> Option<&str> {
        first_non_empty(&[
            &self.varsta_filtru_infractiuni,
            &self.lege_filtru_infractiuni,
        ])
    }
}

#[derive(Debug, Serialize)]
pub struct OffenceRow {
    pub label: i32,
    pub cantitate: Option<i64>,
    pub categorie: String,
    pub filtru: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subfiltru: Option<String>,
}

// ---- saved filters ----

#[derive(Debug, Deserialize)]
pub struct SaveFilterRequest {
    pub categorie: Option<String>,
    pub an: Option<i32>,
    pub tip: Option<String>,
    pub reprezentare: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offence_req() -> OffenceIntervalRequest {
        serde_json::from_value(serde_json::json!({
            "startYearInfractiuni": 2015,
            "endYearInfractiuni": 2020,
            "infractiuni_categorie": "c1"
        }))
        .unwrap()
    }

    #[test]
    fn gen_beats_varsta_when_both_are_set() {
        let mut req = offence_req();
        req.gen_filtru_infractiuni = Some("masculin".into());
        req.varsta_filtru_infractiuni = Some("18-24".into());
        assert_eq!(req.primary_filter(), Some("masculin"));
        assert_eq!(req.secondary_filter(), Some("18-24"));
    }

    #[test]
    fn primary_filter_respects_declared_order() {
        let mut req = offence_req();
        req.cercetari_filtru_infractiuni = Some("cercetari".into());
        req.pedepse_filtru_infractiuni = Some("pedepse".into());
        assert_eq!(req.primary_filter(), Some("cercetari"));

        req.incadrare_filtru_infractiuni = Some("incadrare".into());
        assert_eq!(req.primary_filter(), Some("incadrare"));
    }

    #[test]
    fn no_secondary_filter_when_none_set() {
        let req = offence_req();
        assert_eq!(req.primary_filter(), None);
        assert_eq!(req.secondary_filter(), None);
    }

    #[test]
    fn emergency_filter_priority() {
        let req: EmergencyIntervalRequest = serde_json::from_value(serde_json::json!({
            "startYear": 2015,
            "endYear": 2020,
            "urgente_drog": "canabis",
            "consum_filtru": "zilnic",
            "administrare_filtru": "injectabil"
        }))
        .unwrap();
        assert_eq!(req.active_filter(), Some("zilnic"));
    }

    #[test]
    fn camel_case_year_fields_deserialize() {
        let req: SeizureIntervalRequest = serde_json::from_value(serde_json::json!({
            "startYearConfiscari": 2010,
            "endYearConfiscari": 2012,
            "drog": "canabis",
            "confiscari_subcategorie": "grame"
        }))
        .unwrap();
        assert_eq!(req.start_year, Some(2010));
        assert_eq!(req.end_year, Some(2012));
    }
}
