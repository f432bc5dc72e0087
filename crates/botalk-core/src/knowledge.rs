//! Company Fact Base
//!
//! The structured knowledge the demo assistant answers from. A `FactBase` is
//! built once at startup (either the built-in Botalk data or a JSON file) and
//! shared read-only behind an `Arc` for the lifetime of the process.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

/// Company profile
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub founded_year: String,
    pub mission: String,
    pub vision: String,
    pub description: String,
}

/// A product line, in display order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub use_cases: Vec<String>,
}

/// A subscription tier
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub plan_name: String,
    pub price_label: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Contact details
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Platform name → handle
    #[serde(default)]
    pub social_handles: BTreeMap<String, String>,
}

/// Everything the assistant knows about the company.
///
/// Never mutated after load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactBase {
    pub company: Company,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub pricing_plans: Vec<PricingPlan>,
    #[serde(default)]
    pub faq_entries: Vec<FaqEntry>,
    pub contact: Contact,
}

impl FactBase {
    /// Parse a fact base from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let facts: Self = serde_json::from_str(json)?;
        facts.validate()?;
        Ok(facts)
    }

    /// Load a fact base from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let facts = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            products = facts.products.len(),
            plans = facts.pricing_plans.len(),
            faq = facts.faq_entries.len(),
            "Loaded fact base"
        );
        Ok(facts)
    }

    /// Pretty-printed JSON, used as grounding context for remote generation
    pub fn to_grounding_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.company.name.trim().is_empty() {
            return Err(ChatError::Config("fact base has an empty company name".into()));
        }
        Ok(())
    }

    /// The built-in Botalk AI fact base
    #[allow(clippy::too_many_lines)]
    pub fn botalk() -> Self {
        Self {
            company: Company {
                name: "Botalk AI".into(),
                founded_year: "2022".into(),
                mission: "To make AI conversations accessible to everyone through intuitive chatbot interfaces".into(),
                vision: "Creating a world where human-AI interaction is seamless, intuitive, and beneficial for all".into(),
                description: "Botalk AI is a leading provider of AI-powered conversational interfaces that help businesses engage with their customers more effectively.".into(),
            },
            products: vec![
                Product {
                    name: "Botalk Assistant".into(),
                    description: "Our flagship AI chatbot solution that seamlessly integrates with your website or application".into(),
                    features: strings(&[
                        "Natural language understanding",
                        "Knowledge base integration",
                        "Multi-language support",
                        "Customizable responses",
                        "Analytics dashboard",
                    ]),
                    use_cases: strings(&[
                        "Customer support automation",
                        "Lead generation",
                        "Product recommendations",
                        "Technical troubleshooting",
                        "FAQ automation",
                    ]),
                },
                Product {
                    name: "Botalk Enterprise".into(),
                    description: "Advanced AI solution for large businesses with complex needs".into(),
                    features: strings(&[
                        "Custom training on proprietary data",
                        "Advanced analytics and reporting",
                        "SSO and role-based access control",
                        "SLA-backed support",
                        "White-label solutions",
                    ]),
                    use_cases: Vec::new(),
                },
            ],
            pricing_plans: vec![
                plan("Free", "$0/month", &[
                    "1 chatbot",
                    "100 conversations/month",
                    "Basic analytics",
                    "Standard support",
                ]),
                plan("Starter", "$29/month", &[
                    "3 chatbots",
                    "1,000 conversations/month",
                    "Enhanced analytics",
                    "Priority support",
                    "Custom branding",
                ]),
                plan("Professional", "$99/month", &[
                    "10 chatbots",
                    "10,000 conversations/month",
                    "Advanced analytics",
                    "24/7 support",
                    "API access",
                    "Custom integrations",
                ]),
                plan("Enterprise", "Custom pricing", &[
                    "Unlimited chatbots",
                    "Unlimited conversations",
                    "Enterprise-grade security",
                    "Dedicated account manager",
                    "Custom AI model training",
                    "SLA guarantees",
                ]),
            ],
            faq_entries: vec![
                faq(
                    "How does Botalk AI work?",
                    "Botalk AI uses natural language processing to understand and respond to user queries. It can be trained on your knowledge base to provide accurate and helpful responses specific to your business.",
                ),
                faq(
                    "Can I customize the appearance of the chatbot?",
                    "Yes, you can fully customize the appearance of your Botalk chatbot to match your brand's colors, logo, and style.",
                ),
                faq(
                    "What languages does Botalk support?",
                    "Botalk currently supports over 20 languages including English, Spanish, French, German, Chinese, Japanese, and more.",
                ),
                faq(
                    "How secure is my data with Botalk?",
                    "We take data security very seriously. All data is encrypted in transit and at rest, and we comply with GDPR, CCPA, and other privacy regulations.",
                ),
                faq(
                    "Can Botalk integrate with my existing systems?",
                    "Yes, Botalk can integrate with your CRM, helpdesk, and other business systems through our API and pre-built integrations.",
                ),
                faq(
                    "How long does it take to set up a chatbot?",
                    "Basic setup can be completed in minutes. For more customized solutions with specific knowledge training, it typically takes a few days.",
                ),
            ],
            contact: Contact {
                email: "support@botalk.ai".into(),
                phone: "+1 (555) 123-4567".into(),
                address: "123 AI Boulevard, San Francisco, CA 94103, USA".into(),
                social_handles: BTreeMap::from([
                    ("twitter".to_string(), "@botalkAI".to_string()),
                    ("linkedin".to_string(), "company/botalk-ai".to_string()),
                    ("facebook".to_string(), "BotalkAI".to_string()),
                ]),
            },
        }
    }
}

impl Default for FactBase {
    fn default() -> Self {
        Self::botalk()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn plan(name: &str, price: &str, features: &[&str]) -> PricingPlan {
    PricingPlan {
        plan_name: name.into(),
        price_label: price.into(),
        features: strings(features),
    }
}

fn faq(question: &str, answer: &str) -> FaqEntry {
    FaqEntry {
        question: question.into(),
        answer: answer.into(),
    }
}
