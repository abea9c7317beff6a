//! Prompt construction for chat and recommendations

use verdant_domain::{ProductField, UserPreferences};

/// Builds the prompts sent to the text generator
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build a recommendation prompt
    ///
    /// The marker lines listed in the prompt come from [`ProductField`], so
    /// they always match what the parser recognizes.
    pub fn recommendation(
        preferences: &UserPreferences,
        min_products: usize,
        max_products: usize,
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "Based on these user preferences: {}\n",
            preferences.to_prompt_string()
        ));
        prompt.push_str(&format!(
            "Recommend {}-{} sustainable products from our eco-friendly collection.\n",
            min_products, max_products
        ));
        prompt.push_str("For each product, provide exactly these lines, in this order:\n");
        for field in ProductField::ALL {
            prompt.push_str(&format!("- {}: <{}>\n", field.label(), placeholder(field)));
        }
        prompt.push('\n');
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }

    /// Build a chat prompt: system context, blank line, user message
    pub fn chat(system_context: &str, message: &str) -> String {
        format!("{}\n\nUser Message: {}", system_context, message)
    }
}

fn placeholder(field: ProductField) -> &'static str {
    match field {
        ProductField::Name => "product name",
        ProductField::Description => "one sentence",
        ProductField::ImpactReduction => "how it reduces environmental impact",
        ProductField::PriceRange => "price range",
    }
}

const OUTPUT_FORMAT_REMINDER: &str = "Start every line with \"- \" followed by the label and a colon. \
Separate products with a blank line. Do not use bold, numbering or any other formatting.";
