//! Recommended-candidate list payload

use serde::Deserialize;

use super::string_or_number;
use crate::domain::candidate::{
    CandidateProfile, ColleagueContact, ContactHandles, RecommendedCandidate, WorkEntry,
};

/// `haveChatted` value meaning we already talked to the candidate
const HAVE_CHATTED: i64 = 1;
/// `cooperate` value: linked to a colleague, contact not completed
const COLLEAGUE_PENDING: i64 = 1;
/// `cooperate` value: a colleague already contacted the candidate
const COLLEAGUE_COMPLETED: i64 = 2;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendPage {
    #[serde(default)]
    pub geek_list: Vec<GeekDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeekDto {
    #[serde(default)]
    pub have_chatted: i64,
    #[serde(default)]
    pub cooperate: i64,
    #[serde(default)]
    pub active_time_desc: String,
    #[serde(default)]
    pub geek_card: GeekCardDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeekCardDto {
    #[serde(default, deserialize_with = "string_or_number")]
    pub geek_id: String,
    #[serde(default)]
    pub geek_name: String,
    #[serde(default)]
    pub geek_degree: String,
    #[serde(default)]
    pub geek_edu: GeekEduDto,
    #[serde(default)]
    pub geek_works: Vec<GeekWorkDto>,
    #[serde(default)]
    pub geek_work_year: String,
    #[serde(default)]
    pub expect_position_name: String,
    #[serde(default)]
    pub apply_status_desc: String,
    #[serde(default)]
    pub encrypt_geek_id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub lid: String,
    #[serde(default)]
    pub security_id: String,
    #[serde(default)]
    pub expect_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeekEduDto {
    #[serde(default)]
    pub school: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeekWorkDto {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position_name: Option<String>,
}

impl From<GeekDto> for RecommendedCandidate {
    fn from(geek: GeekDto) -> Self {
        let card = geek.geek_card;
        let colleague_contact = match geek.cooperate {
            COLLEAGUE_COMPLETED => ColleagueContact::Completed,
            COLLEAGUE_PENDING => ColleagueContact::Pending,
            _ => ColleagueContact::None,
        };

        let profile = CandidateProfile {
            candidate_id: card.geek_id,
            name: card.geek_name,
            degree: card.geek_degree,
            school: card.geek_edu.school,
            work_history: card
                .geek_works
                .into_iter()
                .map(|w| WorkEntry {
                    company: w.company,
                    position: w.position_name,
                })
                .collect(),
            work_years: card.geek_work_year,
            expected_position: card.expect_position_name,
            application_status: card.apply_status_desc,
            activity: geek.active_time_desc,
            already_chatted_with_me: geek.have_chatted == HAVE_CHATTED,
            colleague_contact,
        };

        let handles = ContactHandles {
            encrypted_id: card.encrypt_geek_id,
            list_id: card.lid,
            security_token: card.security_id,
            expectation_id: card.expect_id,
        };

        RecommendedCandidate { profile, handles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::Envelope;

    const SAMPLE: &str = r#"{
        "code": 0,
        "message": "Success",
        "zpData": {
            "geekList": [
                {
                    "haveChatted": 0,
                    "cooperate": 2,
                    "activeTimeDesc": "刚刚活跃",
                    "geekCard": {
                        "geekId": 51234,
                        "geekName": "Li Wei",
                        "geekDegree": "硕士",
                        "geekEdu": { "school": "浙江大学" },
                        "geekWorks": [
                            { "company": "Alibaba", "positionName": "Backend" },
                            { "company": "Startup" }
                        ],
                        "geekWorkYear": "5年",
                        "expectPositionName": "Golang",
                        "applyStatusDesc": "离职-随时到岗",
                        "encryptGeekId": "enc-1",
                        "lid": "lid-1",
                        "securityId": "sec-1",
                        "expectId": 987
                    }
                },
                { "haveChatted": 1 }
            ]
        }
    }"#;

    #[test]
    fn test_parse_recommend_page() {
        let envelope: Envelope<RecommendPage> = serde_json::from_str(SAMPLE).unwrap();
        let page = envelope.zp_data.unwrap();
        assert_eq!(page.geek_list.len(), 2);

        let first: RecommendedCandidate = page.geek_list[0].clone().into();
        assert_eq!(first.profile.candidate_id, "51234");
        assert_eq!(first.profile.school, "浙江大学");
        assert_eq!(first.profile.work_history.len(), 2);
        assert_eq!(first.profile.work_history[1].position, None);
        assert_eq!(first.profile.colleague_contact, ColleagueContact::Completed);
        assert!(!first.profile.already_chatted_with_me);
        assert_eq!(first.handles.security_token, "sec-1");
        assert_eq!(first.handles.expectation_id, 987);
    }

    #[test]
    fn test_sparse_entry_uses_defaults() {
        let envelope: Envelope<RecommendPage> = serde_json::from_str(SAMPLE).unwrap();
        let second: RecommendedCandidate = envelope.zp_data.unwrap().geek_list[1].clone().into();
        assert!(second.profile.already_chatted_with_me);
        assert_eq!(second.profile.candidate_id, "");
        assert_eq!(second.profile.colleague_contact, ColleagueContact::None);
    }

    #[test]
    fn test_string_geek_id() {
        let json = r#"{"geekCard": {"geekId": "abc"}}"#;
        let geek: GeekDto = serde_json::from_str(json).unwrap();
        assert_eq!(geek.geek_card.geek_id, "abc");
    }
}
