//! Fixed prompts of the alt-text generator.

pub const SYSTEM_PROMPT: &str = "You are a french SEO expert, with many years of experience.";

pub const ALT_TEXT_INSTRUCTION: &str = "Generate an SEO compliant sentence for product image alt-text in french. Focus on the product, not the background objects.";
