//! Fixed category taxonomy: stable label identifiers plus the natural-language
//! descriptors whose embeddings drive matching.
//!
//! Label identifiers are a stable contract with external consumers and must
//! never be renumbered or reordered in a way that changes meaning. The
//! descriptors are not keyword rules; they are label-meaning prompts for the
//! embedder, and their semantic richness is what determines match quality.


use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel label returned when no category confidently applies.
///
/// Never part of the scored taxonomy; it is the selector's fallback.
pub const FALLBACK_LABEL: &str = "general";

/// One taxonomy entry: a stable label and its semantic gloss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    /// Stable label identifier (wire contract).
    pub label: String,
    /// Natural-language description embedded as the category reference.
    pub description: String,
}

/// Errors from loading or validating a taxonomy.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("taxonomy is empty")]
    Empty,

    #[error("duplicate taxonomy label: {label}")]
    DuplicateLabel { label: String },

    #[error("taxonomy entry has an empty label")]
    EmptyLabel,

    #[error("taxonomy label '{label}' has an empty description")]
    EmptyDescription { label: String },

    #[error("'{FALLBACK_LABEL}' is the fallback sentinel and cannot be a scored label")]
    ReservedLabel,

    #[error("failed to parse taxonomy: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read taxonomy file: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

/// The ordered, fixed set of category labels the engine can assign.
///
/// Declaration order is significant: it breaks score ties deterministically.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    entries: Vec<CategoryDescriptor>,
}

impl Taxonomy {
    /// Returns the built-in deployed taxonomy (38 labels).
    pub fn builtin() -> Self {
        let entries = BUILTIN_DESCRIPTORS
            .iter()
            .map(|(label, description)| CategoryDescriptor {
                label: (*label).to_string(),
                description: (*description).to_string(),
            })
            .collect();

        // The built-in set is validated by tests; construction cannot fail.
        Self { entries }
    }

    /// Builds a taxonomy from descriptors, validating invariants.
    pub fn new(entries: Vec<CategoryDescriptor>) -> Result<Self, TaxonomyError> {
        Self::validate(&entries)?;
        Ok(Self { entries })
    }

    /// Parses a taxonomy from a JSON array of `{label, description}` objects.
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let entries: Vec<CategoryDescriptor> =
            serde_json::from_str(json).map_err(|source| TaxonomyError::Parse { source })?;
        Self::new(entries)
    }

    /// Loads a taxonomy from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, TaxonomyError> {
        let json = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io { source })?;
        Self::from_json(&json)
    }

    fn validate(entries: &[CategoryDescriptor]) -> Result<(), TaxonomyError> {
        if entries.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        let mut seen = std::collections::HashSet::new();
        for entry in entries {
            if entry.label.trim().is_empty() {
                return Err(TaxonomyError::EmptyLabel);
            }
            if entry.label == FALLBACK_LABEL {
                return Err(TaxonomyError::ReservedLabel);
            }
            if entry.description.trim().is_empty() {
                return Err(TaxonomyError::EmptyDescription {
                    label: entry.label.clone(),
                });
            }
            if !seen.insert(entry.label.as_str()) {
                return Err(TaxonomyError::DuplicateLabel {
                    label: entry.label.clone(),
                });
            }
        }

        Ok(())
    }

    /// Number of scored labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the taxonomy has no entries (never true for valid taxonomies).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descriptors in declaration order.
    pub fn entries(&self) -> &[CategoryDescriptor] {
        &self.entries
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Returns `true` if `label` is a scored taxonomy label.
    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|e| e.label == label)
    }
}

/// The deployed label set. Ids must match the backend's stable category ids.
const BUILTIN_DESCRIPTORS: &[(&str, &str)] = &[
    (
        "politics",
        "politics and political leadership, policy debates, parliament, ministers, president, prime minister, political parties, legislation proposals",
    ),
    (
        "geopolitics",
        "geopolitics and international relations, diplomacy, foreign policy, tensions between countries, sanctions, border disputes, embassies, regional conflicts",
    ),
    (
        "elections",
        "elections and voting, campaign rallies, ballots, election results, candidates, polls, referendums, electoral commission, turnout",
    ),
    (
        "government",
        "government administration, ministries, public services, regulations, permits, visas, residency, civil service decisions, public sector programs",
    ),
    (
        "law",
        "law and justice system, court case, judge, magistrate, trial, hearing, legal ruling, verdict, appeal, lawsuit, prosecution, defense lawyer, conviction, sentencing, suspended sentence, bail",
    ),
    (
        "crime",
        "crime and policing, police investigation, arrest, charged, suspect, offender, assault, attack, stabbing, shooting, robbery, burglary, fraud, kidnapping, violence, homicide, domestic violence, missing person",
    ),
    (
        "terrorism",
        "terrorism and extremist violence, terror attack, bombing, hostage, ISIS, al-Qaeda, militant extremist group, mass casualty attack",
    ),
    (
        "conflict",
        "armed conflict and war, fighting, invasion, airstrikes, frontline clashes, ceasefire talks, shelling, military offensive",
    ),
    (
        "defense",
        "defense and military, armed forces, weapons systems, drones, procurement, bases, training exercises, defense ministry announcements",
    ),
    (
        "protest",
        "protests and civil unrest, demonstrations, riots, clashes with police, strikes, curfews, rallies, unrest in streets",
    ),
    (
        "economy",
        "economy and macroeconomics, GDP, inflation, recession, unemployment, cost of living, economic crisis, currency collapse",
    ),
    (
        "markets",
        "financial markets, stock market, indices, bonds, futures, trading, market rally, selloff, volatility, investors",
    ),
    (
        "business",
        "business and companies, earnings, revenue, mergers and acquisitions, layoffs, corporate announcements, CEO changes, lawsuits involving companies",
    ),
    (
        "energy",
        "energy sector, oil, gas, OPEC, pipelines, refineries, fuel supply, renewables, solar, wind, energy prices",
    ),
    (
        "finance",
        "finance and banking, interest rates, central bank, monetary policy, loans, credit, banking sector stability, liquidity",
    ),
    (
        "technology",
        "technology and innovation, software, hardware, AI products, chips, cloud platforms, big tech, consumer electronics, internet services",
    ),
    (
        "cybersecurity",
        "cybersecurity incidents, hacking, cyber attack, data breach, ransomware, malware, phishing, security vulnerabilities, leaked data",
    ),
    (
        "science",
        "science and research, scientific study, discovery, laboratory work, peer reviewed research, experiments, clinical trials",
    ),
    (
        "space",
        "space exploration, rockets, satellite launch, orbit, lunar mission, Mars mission, space agencies, astronauts",
    ),
    (
        "health",
        "health and medicine, hospitals, illness, disease outbreak, vaccines, mental health, public health policy, medical emergency",
    ),
    (
        "weather",
        "weather and severe weather, storms, rainfall, flooding, heatwave, cyclone, hurricane, snow, temperature records, forecasts, weather warnings",
    ),
    (
        "climate",
        "climate change and emissions, carbon, net zero targets, global warming, climate policy, greenhouse gases, climate impacts",
    ),
    (
        "environment",
        "environment and nature, pollution, conservation, wildlife, forests, habitat loss, environmental damage, plastics, contamination",
    ),
    (
        "disaster",
        "disaster response and major emergencies, natural disaster, earthquake, wildfire, flood, hurricane, cyclone, tsunami, rescue operations, evacuations, disaster zone",
    ),
    (
        "accident",
        "accident and incidents, crash, collision, injuries, fatalities, incident investigation, workplace accident, drowning, industrial accident, traffic accident",
    ),
    (
        "transportation",
        "transportation systems and disruptions, roads, highways, traffic, bridges, tunnels, buses, trucking, commuting disruptions, road closures",
    ),
    (
        "aviation",
        "aviation industry and incidents, airlines, aircraft, flights, airports, runway incident, airspace restriction, flight delays, emergency landing",
    ),
    (
        "maritime",
        "maritime and shipping, ships, ports, tankers, ferries, coast guard, maritime accident, sinking, collision at sea",
    ),
    (
        "rail",
        "rail and metro systems, trains, railways, subway, station closures, derailment, rail disruptions, metro delays",
    ),
    (
        "education",
        "education sector, schools, universities, students, teachers, exams, education policy, school safety, academic results",
    ),
    (
        "sports",
        "sports events and competitions, matches, tournaments, leagues, championships, FIFA, Olympics, athletes",
    ),
    (
        "entertainment",
        "entertainment industry, movies, music, concerts, celebrities, box office, actors, streaming releases",
    ),
    (
        "culture",
        "culture and arts, museums, art exhibitions, festivals, heritage sites, cultural events, literature",
    ),
    (
        "fashion",
        "fashion industry, designers, runway shows, couture, fashion week, luxury brands",
    ),
    (
        "travel",
        "travel and tourism, destinations, hotels, travel advisories, visas for travel, airlines tourism demand",
    ),
    (
        "real_estate",
        "real estate and housing, property prices, rent, mortgages, developers, housing market, construction projects",
    ),
    (
        "labor",
        "labor and workforce, workers, unions, strikes, wage disputes, labor policy, workplace rights, employment issues",
    ),
    (
        "food",
        "food and consumer safety, food contamination, recalls, restaurants, food business, agriculture supply chain, food fraud",
    ),
];
