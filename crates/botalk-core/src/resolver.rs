//! Knowledge Resolver
//!
//! Maps a free-text query to a canned answer by walking an ordered list of
//! keyword rules over a [`FactBase`]. The first rule that fires wins, with one
//! exception: FAQ matching collects every entry containing the query.
//!
//! ```text
//! company|about ─▶ product|service ─▶ price|plan|cost ─▶ FAQ* ─▶ contact|email|phone ─▶ NO_MATCH
//! ```

use crate::knowledge::FactBase;

/// Answer returned when nothing in the fact base applies.
///
/// Compared by exact equality to decide whether to escalate to remote
/// generation, so it must stay a single constant.
pub const NO_MATCH: &str = "I don't have specific information about that. Please try asking about our company, products, pricing, or check our FAQ.";

const COMPANY_KEYWORDS: &[&str] = &["company", "about"];
const PRODUCT_KEYWORDS: &[&str] = &["product", "service"];
const PRICING_KEYWORDS: &[&str] = &["price", "plan", "cost"];
const CONTACT_KEYWORDS: &[&str] = &["contact", "email", "phone"];

/// Which part of the fact base answered a query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    Company,
    Products,
    Pricing,
    Faq,
    Contact,
}

/// Resolve a query against the fact base.
///
/// Total and pure: returns [`NO_MATCH`] when no rule applies.
pub fn resolve(query: &str, facts: &FactBase) -> String {
    lookup(query, facts).map_or_else(|| NO_MATCH.to_string(), |(_, answer)| answer)
}

/// Same as [`resolve`] but reports the topic that matched, `None` on a miss.
pub fn lookup(query: &str, facts: &FactBase) -> Option<(Topic, String)> {
    let query = query.to_lowercase();

    let hit = if contains_any(&query, COMPANY_KEYWORDS) {
        Some((Topic::Company, company_answer(facts)))
    } else if contains_any(&query, PRODUCT_KEYWORDS) {
        Some((Topic::Products, products_answer(facts)))
    } else if contains_any(&query, PRICING_KEYWORDS) {
        Some((Topic::Pricing, pricing_answer(facts)))
    } else if let Some(faq) = faq_answer(&query, facts) {
        Some((Topic::Faq, faq))
    } else if contains_any(&query, CONTACT_KEYWORDS) {
        Some((Topic::Contact, contact_answer(facts)))
    } else {
        None
    };

    if let Some((topic, _)) = &hit {
        tracing::debug!(?topic, "Resolved query from fact base");
    }
    hit
}

/// Whether an answer is the no-match sentinel
pub fn is_no_match(answer: &str) -> bool {
    answer == NO_MATCH
}

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| query.contains(k))
}

fn company_answer(facts: &FactBase) -> String {
    let c = &facts.company;
    format!(
        "{} is {} Founded in {}, our mission is {}.",
        c.name, c.description, c.founded_year, c.mission
    )
}

fn products_answer(facts: &FactBase) -> String {
    let products = facts
        .products
        .iter()
        .map(|p| format!("{}: {}", p.name, p.description))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("Our products include:\n\n{products}")
}

fn pricing_answer(facts: &FactBase) -> String {
    let plans = facts
        .pricing_plans
        .iter()
        .map(|p| format!("{} - {}: {}", p.plan_name, p.price_label, p.features.join(", ")))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("Here are our pricing plans:\n\n{plans}")
}

/// Every FAQ entry whose question or answer contains the (lowercased) query
fn faq_answer(query: &str, facts: &FactBase) -> Option<String> {
    let matches: Vec<String> = facts
        .faq_entries
        .iter()
        .filter(|e| e.question.to_lowercase().contains(query) || e.answer.to_lowercase().contains(query))
        .map(|e| format!("Q: {}\nA: {}", e.question, e.answer))
        .collect();

    (!matches.is_empty()).then(|| matches.join("\n\n"))
}

fn contact_answer(facts: &FactBase) -> String {
    let c = &facts.contact;
    format!(
        "You can contact us at:\nEmail: {}\nPhone: {}\nAddress: {}",
        c.email, c.phone, c.address
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::FaqEntry;

    fn facts() -> FactBase {
        FactBase::botalk()
    }

    #[test]
    fn test_company_answer_names_company_and_year() {
        for q in ["Tell me about you", "WHAT COMPANY IS THIS", "xxaboutxx"] {
            let answer = resolve(q, &facts());
            assert!(answer.contains("Botalk AI"), "{q}");
            assert!(answer.contains("2022"), "{q}");
            assert!(answer.contains("To make AI conversations accessible"), "{q}");
        }
    }

    #[test]
    fn test_pricing_listing() {
        let answer = resolve("What pricing plans do you offer?", &facts());
        let expected = "Here are our pricing plans:\n\n\
            Free - $0/month: 1 chatbot, 100 conversations/month, Basic analytics, Standard support\n\n\
            Starter - $29/month: 3 chatbots, 1,000 conversations/month, Enhanced analytics, Priority support, Custom branding\n\n\
            Professional - $99/month: 10 chatbots, 10,000 conversations/month, Advanced analytics, 24/7 support, API access, Custom integrations\n\n\
            Enterprise - Custom pricing: Unlimited chatbots, Unlimited conversations, Enterprise-grade security, Dedicated account manager, Custom AI model training, SLA guarantees";
        assert_eq!(answer, expected);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve("PRICING PLANS", &facts()), resolve("pricing plans", &facts()));
    }

    #[test]
    fn test_idempotent() {
        let f = facts();
        for q in ["products?", "secure", "contact", "weather in Paris", ""] {
            assert_eq!(resolve(q, &f), resolve(q, &f));
        }
    }

    #[test]
    fn test_products_listing() {
        let answer = resolve("Which services do you have?", &facts());
        assert_eq!(
            answer,
            "Our products include:\n\n\
             Botalk Assistant: Our flagship AI chatbot solution that seamlessly integrates with your website or application\n\n\
             Botalk Enterprise: Advanced AI solution for large businesses with complex needs"
        );
    }

    #[test]
    fn test_rule_order_is_short_circuit() {
        // "about" beats "price"
        let (topic, _) = lookup("tell me about the price", &facts()).unwrap();
        assert_eq!(topic, Topic::Company);
        // "product" beats "cost"
        let (topic, _) = lookup("product cost", &facts()).unwrap();
        assert_eq!(topic, Topic::Products);
        // "plan" beats "email"
        let (topic, _) = lookup("email me the plan", &facts()).unwrap();
        assert_eq!(topic, Topic::Pricing);
    }

    #[test]
    fn test_faq_accumulates_in_declaration_order() {
        let answer = resolve("Knowledge", &facts());
        let blocks: Vec<&str> = answer.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Q: How does Botalk AI work?\nA: "));
        assert!(blocks[1].starts_with("Q: How long does it take to set up a chatbot?\nA: "));
    }

    #[test]
    fn test_faq_accumulates_with_fixture() {
        let mut f = facts();
        f.faq_entries = vec![
            FaqEntry { question: "Is my data safe?".into(), answer: "Yes.".into() },
            FaqEntry { question: "Weather?".into(), answer: "Sunny.".into() },
            FaqEntry { question: "Can I export data?".into(), answer: "As CSV.".into() },
        ];
        assert_eq!(
            resolve("DATA", &f),
            "Q: Is my data safe?\nA: Yes.\n\nQ: Can I export data?\nA: As CSV."
        );
    }

    #[test]
    fn test_faq_matches_answer_text() {
        let answer = resolve("gdpr", &facts());
        assert_eq!(answer.matches("Q: ").count(), 1);
        assert!(answer.contains("How secure is my data with Botalk?"));
    }

    #[test]
    fn test_faq_whole_query_substring() {
        // The whole query must appear verbatim, not word by word
        assert_eq!(resolve("secure languages", &facts()), NO_MATCH);
    }

    #[test]
    fn test_faq_checked_before_contact() {
        // "phone" appears in no FAQ text; "data security" does
        let (topic, _) = lookup("data security", &facts()).unwrap();
        assert_eq!(topic, Topic::Faq);
        let (topic, answer) = lookup("What's your phone number?", &facts()).unwrap();
        assert_eq!(topic, Topic::Contact);
        assert_eq!(
            answer,
            "You can contact us at:\nEmail: support@botalk.ai\nPhone: +1 (555) 123-4567\nAddress: 123 AI Boulevard, San Francisco, CA 94103, USA"
        );
    }

    #[test]
    fn test_no_match_is_exact_sentinel() {
        for q in ["What's the weather in Paris?", "zzz", "hello there"] {
            let answer = resolve(q, &facts());
            assert_eq!(answer, NO_MATCH, "{q}");
            assert!(is_no_match(&answer));
            assert!(lookup(q, &facts()).is_none());
        }
    }

    #[test]
    fn test_empty_query_returns_every_faq() {
        let answer = resolve("", &facts());
        assert_eq!(answer.matches("Q: ").count(), 6);
    }
}
