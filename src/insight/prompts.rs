//! Prompt construction for the two insight actions.

use crate::models::MemberSummary;
use anyhow::{Context, Result};

/// Build the community analysis prompt from summarized members.
pub fn community_prompt(members: &[MemberSummary]) -> Result<String> {
    let data = serde_json::to_string(members).context("Failed to serialize member summaries")?;

    let mut prompt = String::new();
    prompt.push_str(
        "Analyze this health community data and provide a summary for a community manager.\n",
    );
    prompt.push_str("Focus on:\n");
    prompt.push_str("1. Overall health trends.\n");
    prompt.push_str(
        "2. Specific groups or issues that need attention (the \"At-Risk\" members).\n",
    );
    prompt.push_str(
        "3. Three actionable recommendations for community-wide wellness challenges or events.\n",
    );
    prompt.push_str("\nData: ");
    prompt.push_str(&data);

    Ok(prompt)
}

/// Build the personalized tip prompt for one member.
pub fn member_tip_prompt(member: &MemberSummary) -> String {
    format!(
        "As a health community manager, write a 2-sentence encouraging personalized wellness tip for {}.\n\
         Member profile: Status {}, Avg Steps: {}, Avg Sleep: {}h.",
        member.name, member.status, member.metrics.avg_steps, member.metrics.sleep_hours
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::seed::seed_members;

    #[test]
    fn test_community_prompt_embeds_summaries() {
        let summaries: Vec<MemberSummary> = seed_members().iter().map(MemberSummary::from).collect();
        let prompt = community_prompt(&summaries).unwrap();

        assert!(prompt.contains("Three actionable recommendations"));
        assert!(prompt.contains("\"name\":\"Marcus Chen\""));
        assert!(prompt.contains("\"status\":\"At-Risk\""));
        assert!(prompt.contains("\"avgSteps\":2100"));
        // Email and avatar are never sent to the model.
        assert!(!prompt.contains("example.com"));
        assert!(!prompt.contains("picsum"));
    }

    #[test]
    fn test_member_tip_prompt() {
        let members = seed_members();
        let prompt = member_tip_prompt(&MemberSummary::from(&members[2]));

        assert!(prompt.contains("tip for Elena Rodriguez."));
        assert!(prompt.contains("Status Active, Avg Steps: 12000, Avg Sleep: 8h."));
    }
}
