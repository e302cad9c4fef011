//! Prompt templates for each conference stage

use crate::conference::{Conference, Participant};
use crate::core::string::truncate;

/// Appended to every regular discussion remark.
pub const RESPONSE_INSTRUCTION: &str = "Make sure your remarks follow on from the discussion so \
far, and in particular respond to the points made by the one or two most recent speakers. Avoid \
generic statements; engage specifically with what has been said.";

/// Longest error excerpt embedded in a fallback utterance.
const FALLBACK_ERROR_LEN: usize = 100;

/// Templates for generating prompts and fixed utterances
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt establishing a speaker's persona
    pub fn speaker_system(speaker: &Participant, language: &str) -> String {
        let mut prompt = format!(
            "You are {}, {}, taking part in a business meeting.",
            speaker.name, speaker.title
        );
        if !speaker.personality.is_empty() {
            prompt.push_str(&format!("\nPersonality: {}", speaker.personality));
        }
        if !speaker.expertise.is_empty() {
            prompt.push_str(&format!("\nExpertise: {}", speaker.expertise));
        }
        prompt.push_str(&format!(
            "\nStay in character, speak in the first person and keep remarks concise. \
             Respond in {}.",
            language
        ));
        prompt
    }

    /// Fixed opening remark by the moderator
    pub fn welcome(moderator: &Participant, topic: &str) -> String {
        format!(
            "Hello everyone, I'm {}, acting as secretary for today's meeting. Welcome to our \
             meeting on \"{}\". We'll begin with a round of introductions: please introduce \
             yourselves briefly and share your first thoughts on the topic. After that, the \
             chair will lead us into the discussion.",
            moderator.name, topic
        )
    }

    /// User prompt for a participant's self-introduction
    pub fn introduction(conference: &Conference, speaker: &Participant) -> String {
        format!(
            r#"You are {name}, {title}. The meeting on "{topic}" is starting.

Introduce yourself in two or three sentences: your role, what you are responsible for, and your first view on the topic.

Respond in {language}."#,
            name = speaker.name,
            title = speaker.title,
            topic = conference.topic(),
            language = conference.language(),
        )
    }

    /// User prompt for the chair opening a round
    ///
    /// `context` is empty for the first round.
    pub fn chair_opening(
        conference: &Conference,
        chair: &Participant,
        round: u32,
        round_topic: &str,
        context: &str,
    ) -> String {
        let mut prompt = format!(
            r#"You are {name}, {title}, chairing the meeting on "{topic}".

Open discussion round {round}. The focus of this round is: {round_topic}"#,
            name = chair.name,
            title = chair.title,
            topic = conference.topic(),
        );

        if !context.is_empty() {
            prompt.push_str(&format!(
                "\n\nRecent discussion:\n{}\n\nBriefly connect the previous round to this one.",
                context
            ));
        }

        if let Some(scenario) = conference.scenario() {
            prompt.push_str(&format!("\n\n{}", scenario.system_prompt));
        }

        prompt.push_str(&format!(
            "\n\nIntroduce the focus, pose one or two guiding questions and invite the others \
             to contribute.\n\nRespond in {}.",
            conference.language()
        ));
        prompt
    }

    /// User prompt for a regular remark within a round
    pub fn discussion(
        conference: &Conference,
        speaker: &Participant,
        round_topic: &str,
        context: &str,
    ) -> String {
        let mut prompt = format!(
            r#"You are {name}, {title}, in a meeting on "{topic}".

Current focus: {round_topic}

Recent discussion:
{context}

Share your view from the perspective of your role."#,
            name = speaker.name,
            title = speaker.title,
            topic = conference.topic(),
        );

        if let Some(scenario) = conference.scenario() {
            prompt.push_str(&format!(
                "\n\n{}\n{}",
                scenario.system_prompt, scenario.discussion_guidance
            ));
        }

        prompt.push_str(&format!(
            "\n\nRespond in {}.\n{}",
            conference.language(),
            RESPONSE_INSTRUCTION
        ));
        prompt
    }

    /// System prompt for the moderator's summary
    pub fn summary_system(moderator: &Participant) -> String {
        format!(
            "You are {}, the meeting secretary. Your job is to organise and summarise the \
             meeting, giving clear conclusions and follow-up actions.",
            moderator.name
        )
    }

    /// User prompt asking the moderator to summarise the meeting
    pub fn summary(conference: &Conference, moderator: &Participant, context: &str) -> String {
        format!(
            r#"You are {name} ({title}), responsible for the minutes of this meeting.

The meeting topic was "{topic}" and it ran over several rounds of discussion.

Excerpt of the remarks:
{context}

Please:
1. Briefly acknowledge the chair and say you will summarise the meeting
2. Summarise the main discussion points and positions
3. List 5-7 key conclusions or action items, numbered
4. Suggest 1-2 directions that need follow-up

Start with the reply to the chair, then the summary, then the numbered list. Keep it under 400 words.

Respond in {language}."#,
            name = moderator.name,
            title = moderator.title,
            topic = conference.topic(),
            language = conference.language(),
        )
    }

    /// Chair handing the floor to the moderator for the summary
    pub fn chair_handoff(moderator: &Participant) -> String {
        format!(
            "Thank you all for an excellent discussion. We have completed our discussion \
             rounds and now move to the conclusion. Let's ask {} to pull together the key \
             points of today's meeting.",
            moderator.name
        )
    }

    /// Moderator opening the conclusion when no chair is available
    pub fn moderator_handoff() -> String {
        "Thank you all for an excellent discussion. We have completed our discussion rounds and \
         now move to the conclusion. As the meeting secretary, I will summarise today's key \
         points."
            .to_string()
    }

    pub fn chair_closing(moderator: &Participant) -> String {
        format!(
            "Thank you {} for the summary, and thank you all for your contributions. That \
             concludes today's meeting.",
            moderator.name
        )
    }

    pub fn moderator_closing() -> String {
        "That is the summary of today's meeting. Thank you all for taking part; the meeting is \
         now closed."
            .to_string()
    }

    /// Utterance used when generation fails for a turn
    pub fn fallback_utterance(speaker_id: &str, error: &str) -> String {
        format!(
            "An error occurred while generating a response. I'm {}, and I'll keep \
             participating in the discussion. Error: {}",
            speaker_id,
            truncate(error, FALLBACK_ERROR_LEN)
        )
    }

    /// Summary used when generating the summary fails
    pub fn summary_fallback(topic: &str) -> String {
        format!(
            "Thank you, chair. As the meeting secretary I wanted to summarise today's \
             discussion on \"{}\", but ran into technical problems while preparing it. From \
             my notes, we covered several aspects of the topic and reached some common \
             ground. Thank you all for your participation and valuable input.",
            topic
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conference::ConferenceConfig;

    fn conference(scenario: Option<&str>) -> Conference {
        let mut config = ConferenceConfig::new(
            "Q3 roadmap",
            vec![
                Participant::new("gm", "Alex", "General manager"),
                Participant::new("cfo", "Dana", "Financial manager"),
            ],
        )
        .with_language("Deutsch");
        if let Some(name) = scenario {
            config = config.with_scenario(name);
        }
        Conference::new("c1", config).unwrap()
    }

    #[test]
    fn test_speaker_system_includes_persona() {
        let speaker = Participant::new("cfo", "Dana", "Financial manager")
            .with_personality("Cautious")
            .with_expertise("Budgeting");
        let prompt = PromptTemplate::speaker_system(&speaker, "English");
        assert!(prompt.contains("Dana, Financial manager"));
        assert!(prompt.contains("Personality: Cautious"));
        assert!(prompt.contains("Expertise: Budgeting"));
        assert!(prompt.contains("Respond in English."));
    }

    #[test]
    fn test_prompts_carry_language() {
        let conf = conference(None);
        let speaker = &conf.participants()[0];
        assert!(PromptTemplate::introduction(&conf, speaker).contains("Respond in Deutsch."));
        assert!(
            PromptTemplate::summary(&conf, &conf.moderator(), "").contains("Respond in Deutsch.")
        );
    }

    #[test]
    fn test_chair_opening_omits_empty_context() {
        let conf = conference(None);
        let chair = &conf.participants()[0];

        let first = PromptTemplate::chair_opening(&conf, chair, 1, "focus", "");
        assert!(!first.contains("Recent discussion"));

        let later = PromptTemplate::chair_opening(&conf, chair, 2, "focus", "earlier remark");
        assert!(later.contains("Recent discussion:\nearlier remark"));
        assert!(later.contains("round 2"));
    }

    #[test]
    fn test_discussion_ends_with_response_instruction() {
        let conf = conference(None);
        let prompt =
            PromptTemplate::discussion(&conf, &conf.participants()[1], "focus", "a\nb");
        assert!(prompt.contains("a\nb"));
        assert!(prompt.ends_with(RESPONSE_INSTRUCTION));
    }

    #[test]
    fn test_discussion_includes_scenario_guidance() {
        let conf = conference(Some("brainstorming"));
        let prompt = PromptTemplate::discussion(&conf, &conf.participants()[1], "focus", "");
        assert!(prompt.contains("This is a brainstorming session"));
        assert!(prompt.contains("There are no bad ideas here"));
    }

    #[test]
    fn test_fallback_truncates_error() {
        let error = "x".repeat(300);
        let text = PromptTemplate::fallback_utterance("cfo", &error);
        assert!(text.contains("I'm cfo"));
        assert!(text.ends_with("..."));
        assert!(!text.contains(&"x".repeat(101)));
    }
}
