//! Structured instruction assembly for AI generation calls.
//!
//! Every AI-backed feature builds its instruction through [`PromptSections`]
//! so prompts stay uniform across cover letters, insights and quizzes.

/// Optional labeled sections of a generation instruction. Transient value
/// object: assembled once, sent to the gateway, discarded.
#[derive(Debug, Clone, Default)]
pub struct PromptSections {
    pub context: Option<String>,
    pub role: Option<String>,
    pub instruction: Option<String>,
    pub specification: Option<String>,
    pub performance: Option<String>,
    pub example: Option<String>,
}

impl PromptSections {
    /// Concatenate the present sections into labeled blocks in fixed order.
    ///
    /// The Specification, Performance and Example labels are always emitted,
    /// even when their section is absent, so the instruction layout stays
    /// deterministic for prompt templates that reference them.
    pub fn assemble(&self) -> String {
        let mut out = String::new();

        if let Some(context) = &self.context {
            out.push_str("Context:\n");
            out.push_str(context);
            out.push_str("\n\n");
        }
        if let Some(role) = &self.role {
            out.push_str("Role:\n");
            out.push_str(role);
            out.push_str("\n\n");
        }
        if let Some(instruction) = &self.instruction {
            out.push_str("Instruction:\n");
            out.push_str(instruction);
            out.push_str("\n\n");
        }

        out.push_str("Specification:\n");
        if let Some(specification) = &self.specification {
            out.push_str(specification);
        }
        out.push_str("\n\n");

        out.push_str("Performance:\n");
        if let Some(performance) = &self.performance {
            out.push_str(performance);
        }
        out.push_str("\n\n");

        out.push_str("Example:\n");
        if let Some(example) = &self.example {
            out.push_str(example);
        }
        out.push('\n');

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_all_sections_in_fixed_order() {
        let sections = PromptSections {
            context: Some("Senior backend engineer, 8 years".to_string()),
            role: Some("You are an expert career coach".to_string()),
            instruction: Some("Write a cover letter".to_string()),
            specification: Some("Max 350 words".to_string()),
            performance: Some("Professional tone".to_string()),
            example: Some("Dear Hiring Manager, ...".to_string()),
        };

        let prompt = sections.assemble();
        let ctx = prompt.find("Context:").unwrap();
        let role = prompt.find("Role:").unwrap();
        let inst = prompt.find("Instruction:").unwrap();
        let spec = prompt.find("Specification:").unwrap();
        let perf = prompt.find("Performance:").unwrap();
        let ex = prompt.find("Example:").unwrap();

        assert!(ctx < role && role < inst && inst < spec && spec < perf && perf < ex);
        assert!(prompt.contains("Max 350 words"));
    }

    #[test]
    fn trailing_labels_emitted_even_when_blank() {
        let sections = PromptSections {
            instruction: Some("Improve this bullet".to_string()),
            ..Default::default()
        };

        let prompt = sections.assemble();
        assert!(prompt.contains("Specification:"));
        assert!(prompt.contains("Performance:"));
        assert!(prompt.contains("Example:"));
        // Leading labels are only emitted for present sections
        assert!(!prompt.contains("Context:"));
        assert!(!prompt.contains("Role:"));
    }

    #[test]
    fn empty_sections_still_deterministic() {
        let a = PromptSections::default().assemble();
        let b = PromptSections::default().assemble();
        assert_eq!(a, b);
        assert!(a.starts_with("Specification:"));
    }
}
