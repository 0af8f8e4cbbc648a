use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastRole {
    Lead,
    #[default]
    Supporting,
    Minor,
}

/// 角色信息，与剧本一同生成，按项目单独存放
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub id: String,
    pub project_id: String,
    pub character_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub role: CastRole,
    #[serde(default)]
    pub arc_summary: String,
    #[serde(default)]
    pub actor_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl CastMember {
    pub fn from_generated(
        project_id: impl Into<String>,
        character_name: impl Into<String>,
        description: impl Into<String>,
        role: Option<CastRole>,
        arc_summary: impl Into<String>,
    ) -> Self {
        CastMember {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            character_name: character_name.into(),
            description: description.into(),
            role: role.unwrap_or_default(),
            arc_summary: arc_summary.into(),
            actor_type: String::new(),
            portrait_url: None,
            generated_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_defaults_to_supporting() {
        let member = CastMember::from_generated("p", "MAYA", "", None, "");
        assert_eq!(member.role, CastRole::Supporting);
        let json = r#"{"id":"c","projectId":"p","characterName":"JO","role":"lead"}"#;
        let parsed: CastMember = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.role, CastRole::Lead);
        assert!(parsed.portrait_url.is_none());
    }
}
