//! The fixed evaluation role roster.
//!
//! Roles are configuration data: a name, a cluster, and the focus text that
//! parameterizes one prompt template. There is no per-role behavior beyond
//! the prompt each role contributes to the panel run.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::idea::IdeaInput;

/// Named group of roles whose scores are averaged into a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cluster {
    CoreIdea,
    MarketOpportunity,
    Execution,
    BusinessModel,
    Team,
    Compliance,
    RiskStrategy,
}

impl Cluster {
    /// All clusters in presentation order.
    pub const ALL: [Cluster; 7] = [
        Cluster::CoreIdea,
        Cluster::MarketOpportunity,
        Cluster::Execution,
        Cluster::BusinessModel,
        Cluster::Team,
        Cluster::Compliance,
        Cluster::RiskStrategy,
    ];

    /// Human-readable cluster name.
    pub fn name(&self) -> &'static str {
        match self {
            Cluster::CoreIdea => "Core Idea",
            Cluster::MarketOpportunity => "Market Opportunity",
            Cluster::Execution => "Execution",
            Cluster::BusinessModel => "Business Model",
            Cluster::Team => "Team",
            Cluster::Compliance => "Compliance",
            Cluster::RiskStrategy => "Risk & Strategy",
        }
    }

    /// Default weight of this cluster in the overall score.
    pub fn default_weight(&self) -> u32 {
        match self {
            Cluster::CoreIdea => 15,
            Cluster::MarketOpportunity => 20,
            Cluster::Execution => 20,
            Cluster::BusinessModel => 15,
            Cluster::Team => 10,
            Cluster::Compliance => 10,
            Cluster::RiskStrategy => 10,
        }
    }

    /// Parses a cluster from its human-readable name.
    pub fn from_name(name: &str) -> Option<Cluster> {
        Cluster::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One evaluation perspective: a role name, its cluster, and its focus text.
#[derive(Debug, Clone, Copy)]
pub struct RoleSpec {
    pub role: &'static str,
    pub cluster: Cluster,
    pub focus: &'static str,
}

impl RoleSpec {
    /// Renders the completion prompt for this role against an idea.
    ///
    /// The optional personalization context is appended verbatim; roles never
    /// see each other's output.
    pub fn render_prompt(&self, idea: &IdeaInput, personalization: Option<&str>) -> String {
        let mut prompt = format!(
            "You are a startup validation expert evaluating {focus} within the {cluster} framework.\n\
             \n\
             Startup idea: {title}\n\
             Concept: {concept}\n\
             \n\
             Evaluate this idea strictly for {role}. Assign a score from 1.0 (very weak) \
             to 5.0 (excellent) and justify it in two or three sentences.\n",
            focus = self.focus,
            cluster = self.cluster.name(),
            title = idea.title().as_str(),
            concept = idea.concept().as_str(),
            role = self.role,
        );
        if let Some(context) = personalization {
            prompt.push_str("\nFounder context (phrase insights relative to it):\n");
            prompt.push_str(context);
            prompt.push('\n');
        }
        prompt.push_str(
            "\nReturn ONLY valid JSON, no markdown fences: {\"score\": <number>, \"rationale\": \"<text>\"}",
        );
        prompt
    }
}

/// The complete fixed roster, grouped by cluster, in panel order.
static ROSTER: Lazy<Vec<RoleSpec>> = Lazy::new(|| {
    fn spec(role: &'static str, cluster: Cluster, focus: &'static str) -> RoleSpec {
        RoleSpec { role, cluster, focus }
    }

    vec![
        // Core Idea
        spec("Originality", Cluster::CoreIdea, "novelty of the concept versus existing solutions"),
        spec("Differentiation", Cluster::CoreIdea, "defensible differences from direct competitors"),
        spec("Innovation Index", Cluster::CoreIdea, "depth of innovation in product and approach"),
        spec("Problem Severity", Cluster::CoreIdea, "how acute and widespread the target problem is"),
        spec("Solution Effectiveness", Cluster::CoreIdea, "how completely the proposal solves the stated problem"),
        // Market Opportunity
        spec("Market Size (TAM)", Cluster::MarketOpportunity, "total addressable market and realistic reachable share"),
        spec("Competitive Intensity", Cluster::MarketOpportunity, "density and strength of incumbent competition"),
        spec("Market Growth Rate", Cluster::MarketOpportunity, "trajectory of demand in the target segment"),
        spec("Customer Acquisition Potential", Cluster::MarketOpportunity, "viability of acquisition channels and costs"),
        spec("Timing & Market Readiness", Cluster::MarketOpportunity, "whether the market is ready for this solution now"),
        // Execution
        spec("Technology Maturity", Cluster::Execution, "maturity of the required technology stack"),
        spec("Scalability & Performance", Cluster::Execution, "ability to scale the product under growth"),
        spec("Technical Architecture", Cluster::Execution, "soundness of the proposed technical approach"),
        spec("Development Complexity", Cluster::Execution, "engineering effort and delivery risk"),
        spec("Process Efficiency", Cluster::Execution, "operational processes needed to deliver the service"),
        // Business Model
        spec("Revenue Model Viability", Cluster::BusinessModel, "credibility of the proposed revenue streams"),
        spec("Pricing Strategy", Cluster::BusinessModel, "fit of pricing to customer willingness to pay"),
        spec("Unit Economics", Cluster::BusinessModel, "margin structure per customer or transaction"),
        spec("Cost Structure", Cluster::BusinessModel, "fixed and variable cost profile"),
        spec("Model Scalability", Cluster::BusinessModel, "whether the business model improves with scale"),
        // Team
        spec("Founder Experience", Cluster::Team, "relevant founder track record and skills"),
        spec("Team Completeness", Cluster::Team, "coverage of critical functions in the founding team"),
        spec("Domain Expertise", Cluster::Team, "depth of insider knowledge of the target domain"),
        spec("Advisory Support", Cluster::Team, "access to advisors and industry networks"),
        spec("Hiring Capability", Cluster::Team, "ability to attract the talent the plan requires"),
        // Compliance
        spec("Regulatory Landscape", Cluster::Compliance, "regulatory regime governing the product"),
        spec("Data Privacy Compliance", Cluster::Compliance, "personal data handling obligations"),
        spec("Licensing Requirements", Cluster::Compliance, "licenses and certifications needed to operate"),
        spec("Industry Standards", Cluster::Compliance, "conformance with applicable industry standards"),
        spec("Legal Risk Exposure", Cluster::Compliance, "liability and contractual risk surface"),
        // Risk & Strategy
        spec("Market Risk", Cluster::RiskStrategy, "exposure to demand and market-shift risk"),
        spec("Execution Risk", Cluster::RiskStrategy, "risk of failing to deliver the plan"),
        spec("Strategic Positioning", Cluster::RiskStrategy, "long-term position against market evolution"),
        spec("Exit Potential", Cluster::RiskStrategy, "plausible acquisition or public-market outcomes"),
        spec("Contingency Planning", Cluster::RiskStrategy, "fallback options if core assumptions fail"),
    ]
});

/// Returns the full fixed roster in panel order.
pub fn roster() -> &'static [RoleSpec] {
    &ROSTER
}
