//! Free-text project metadata collected by the wizard.
//!
//! Serialization only; nothing here takes part in calculation.

use serde::{Deserialize, Serialize};

/// Order header: who, when, for whom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub company: String,
    pub start: String,
    pub due: String,
    pub client: String,
    pub phone: String,
    pub manager: String,
}

/// Technical brief.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brief {
    pub purpose: String,
    pub materials: String,
    pub colors: String,
    pub sizes: String,
    pub tech: String,
    pub terms: String,
}

/// Design iterations and approval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignNotes {
    pub v1: String,
    pub v2: String,
    pub notes: String,
    #[serde(rename = "final")]
    pub final_layout: String,
    pub designer: String,
    pub approve_date: String,
}

/// Workshop and installation summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Production {
    pub materials: String,
    pub tech: String,
    pub terms: String,
    pub montage: String,
}

/// Everything the wizard collects besides the calculation table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMetadata {
    pub info: ProjectInfo,
    pub brief: Brief,
    pub design: DesignNotes,
    pub production: Production,
}

impl ProjectInfo {
    /// `(key, value)` pairs in form order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("company", self.company.as_str()),
            ("start", self.start.as_str()),
            ("due", self.due.as_str()),
            ("client", self.client.as_str()),
            ("phone", self.phone.as_str()),
            ("manager", self.manager.as_str()),
        ]
    }
}

impl Brief {
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("purpose", self.purpose.as_str()),
            ("materials", self.materials.as_str()),
            ("colors", self.colors.as_str()),
            ("sizes", self.sizes.as_str()),
            ("tech", self.tech.as_str()),
            ("terms", self.terms.as_str()),
        ]
    }
}

impl DesignNotes {
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("v1", self.v1.as_str()),
            ("v2", self.v2.as_str()),
            ("notes", self.notes.as_str()),
            ("final", self.final_layout.as_str()),
            ("designer", self.designer.as_str()),
            ("approve_date", self.approve_date.as_str()),
        ]
    }
}

impl Production {
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("materials", self.materials.as_str()),
            ("tech", self.tech.as_str()),
            ("terms", self.terms.as_str()),
            ("montage", self.montage.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_final_key() {
        let design = DesignNotes {
            final_layout: "v2 + правки".into(),
            ..DesignNotes::default()
        };
        let json = serde_json::to_value(&design).unwrap();
        assert_eq!(json["final"], "v2 + правки");
        assert!(json.get("final_layout").is_none());
        assert_eq!(design.fields()[3], ("final", "v2 + правки"));
    }

    #[test]
    fn test_partial_metadata_deserializes() {
        let meta: ProjectMetadata =
            serde_json::from_str(r#"{"info":{"company":"ТОО Ромашка"}}"#).unwrap();
        assert_eq!(meta.info.company, "ТОО Ромашка");
        assert!(meta.brief.purpose.is_empty());
    }

    #[test]
    fn test_field_order() {
        let keys: Vec<_> = ProjectInfo::default().fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["company", "start", "due", "client", "phone", "manager"]);
        assert_eq!(Production::default().fields().len(), 4);
    }
}
