//! Built-in sample documents used to initialize an empty library.
//!
//! # Invariants
//! - Exactly three documents with ids `1`, `2`, `3` and zero views.
//! - Output is deterministic for a given owner name.
//! - Content text, including indented blank lines and trailing spaces, is
//!   kept exactly as first published; readers go through `paragraphs()`.

use crate::model::document::ResearchItem;

const CARDIOVASCULAR_CONTENT: &str = r#"This study investigates the correlation between high-density urban living and cardiovascular health markers. 
    
    Methodology: A cohort of 5,000 individuals aged 30-60 residing in metropolitan areas was tracked over a 5-year period. We utilized wearable bio-monitors to track heart rate variability, blood pressure fluctuations, and sleep patterns.
    
    Results: The data indicates a significant 15% increase in hypertension risk for individuals living within 500 meters of major arterial roads compared to those in suburban environments. Furthermore, cortisol levels were elevated by an average of 20% in the urban group.
    
    Discussion: Noise pollution and particulate matter (PM2.5) exposure appear to be the primary drivers. Specifically, nighttime noise disruptions correlated strongly with arterial stiffness.
    
    Conclusion: Urban planning must integrate more green buffer zones. Future research will focus on the specific biological pathways activated by chronic low-level noise exposure. This research underscores the urgent need for policy changes regarding residential zoning near highways."#;

const ASTHMA_CONTENT: &str = r#"Pediatric asthma remains a leading cause of emergency room visits globally. This paper reviews novel therapeutic targets involving the interleukin-33 (IL-33) pathway.
    
    Background: Standard corticosteroids, while effective, have long-term growth suppression side effects in children. 
    
    Study Design: We conducted a double-blind, placebo-controlled trial involving a new monoclonal antibody targeting the IL-33 receptor. 
    
    Findings: The experimental group showed a 40% reduction in exacerbation frequency over 12 months. Lung function tests (FEV1) improved by 12% compared to the baseline, whereas the placebo group showed only a 2% improvement.
    
    Significance: This therapy offers a steroid-sparing alternative for severe asthma phenotypes. It highlights the shift towards precision medicine in pediatric pulmonology. Further longitudinal studies are required to assess safety over periods longer than 3 years."#;

const IMAGING_CONTENT: &str = r#"Artificial Intelligence (AI) is revolutionizing radiology. This paper presents a retrospective analysis of a proprietary deep learning algorithm designed to detect early-stage pulmonary nodules.
    
    Dataset: 10,000 anonymized chest CT scans were used for training and validation (80/20 split).
    
    Performance: The algorithm achieved a sensitivity of 94% and a specificity of 88%, outperforming junior radiologists by a margin of 12%.
    
    Clinical Application: Integration of this tool into standard PACS workflows reduced average reporting time by 30%. However, the "black box" nature of the decision-making process remains a barrier to full clinical trust.
    
    Future Directions: We are currently developing an explainable AI (XAI) module that highlights the specific regions of interest (ROIs) driving the algorithm's prediction to aid radiologist verification."#;

/// Returns the seed set in storage order.
pub fn seed_documents(owner_name: &str) -> Vec<ResearchItem> {
    vec![
        ResearchItem {
            id: "1".to_string(),
            title: "Cardiovascular Risks in Urban Populations".to_string(),
            authors: format!("{owner_name}, Dr. Sarah Jenkins"),
            date: "2023-10-15".to_string(),
            content: CARDIOVASCULAR_CONTENT.to_string(),
            views: 0,
        },
        ResearchItem {
            id: "2".to_string(),
            title: "Novel Approaches to Pediatric Asthma".to_string(),
            authors: owner_name.to_string(),
            date: "2024-01-20".to_string(),
            content: ASTHMA_CONTENT.to_string(),
            views: 0,
        },
        ResearchItem {
            id: "3".to_string(),
            title: "The Role of Artificial Intelligence in Early Diagnostic Imaging".to_string(),
            authors: format!("{owner_name}, T. R. Smith"),
            date: "2024-03-10".to_string(),
            content: IMAGING_CONTENT.to_string(),
            views: 0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::seed_documents;
    use crate::model::document::is_valid_date;

    #[test]
    fn seed_set_is_three_fresh_documents() {
        let seed = seed_documents("Owner");
        let ids: Vec<&str> = seed.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(seed.iter().all(|item| item.views == 0));
        assert!(seed.iter().all(|item| is_valid_date(&item.date)));
        assert!(seed.iter().all(|item| item.authors.starts_with("Owner")));
    }

    #[test]
    fn seed_content_keeps_published_spacing() {
        let seed = seed_documents("Owner");
        assert!(seed[0]
            .content
            .contains("cardiovascular health markers. \n    \n    Methodology:"));
        assert_eq!(seed[0].paragraphs().len(), 5);
        assert_eq!(seed[1].paragraphs().len(), 5);
        assert_eq!(seed[2].paragraphs().len(), 5);
        assert!(seed[2].content.contains(r#"the "black box" nature"#));
    }
}
