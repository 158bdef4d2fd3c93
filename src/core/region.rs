use crate::domain::model::Region;
use crate::utils::error::{Result, TravelyError};
use std::collections::HashMap;

/// Country to region table. Every country is listed under exactly one region.
///
/// Australia and the Pacific island states belong to Oceania only; Taiwan is
/// listed under Asia so the sample itinerary stops classify.
pub const DEFAULT_REGION_TABLE: &[(Region, &[&str])] = &[
    (
        Region::Europe,
        &[
            "France", "Italy", "Spain", "UK", "Germany", "Austria", "Switzerland", "Netherlands",
            "Belgium", "Portugal", "Greece", "Poland", "Czechia", "Hungary", "Sweden", "Norway",
            "Denmark", "Finland", "Ireland", "Croatia", "Bulgaria", "Romania", "Slovakia",
            "Slovenia", "Estonia", "Latvia", "Lithuania",
        ],
    ),
    (
        Region::Asia,
        &[
            "Japan", "Thailand", "China", "India", "South Korea", "Singapore", "Malaysia",
            "Indonesia", "Philippines", "Vietnam", "Cambodia", "Laos", "Myanmar", "Sri Lanka",
            "Nepal", "Bhutan", "Bangladesh", "Pakistan", "Afghanistan", "Iran", "Iraq", "Turkey",
            "Saudi Arabia", "UAE", "Israel", "Jordan", "Lebanon", "Syria", "Kuwait", "Qatar",
            "Bahrain", "Oman", "Yemen", "Taiwan",
        ],
    ),
    (
        Region::Americas,
        &[
            "USA", "Canada", "Mexico", "Brazil", "Argentina", "Chile", "Colombia", "Peru",
            "Venezuela", "Ecuador", "Bolivia", "Paraguay", "Uruguay", "Guyana", "Suriname",
            "French Guiana", "Costa Rica", "Panama", "Guatemala", "Honduras", "Nicaragua",
            "El Salvador", "Belize", "Cuba", "Jamaica", "Haiti", "Dominican Republic",
            "Puerto Rico", "Trinidad and Tobago", "Barbados", "Antigua and Barbuda", "Saint Lucia",
            "Grenada", "Saint Vincent and the Grenadines", "Dominica", "Saint Kitts and Nevis",
        ],
    ),
    (
        Region::Africa,
        &[
            "South Africa", "Egypt", "Nigeria", "Kenya", "Morocco", "Algeria", "Tunisia", "Libya",
            "Sudan", "Ethiopia", "Ghana", "Tanzania", "Uganda", "Cameroon", "Ivory Coast",
            "Madagascar", "Mozambique", "Angola", "Burkina Faso", "Mali", "Malawi", "Zambia",
            "Somalia", "Senegal", "Zimbabwe", "Guinea", "Rwanda", "Benin", "Burundi",
            "South Sudan", "Togo", "Sierra Leone", "Liberia", "Central African Republic",
            "Mauritania", "Eritrea", "Gambia", "Botswana", "Namibia", "Gabon", "Lesotho",
            "Guinea-Bissau", "Equatorial Guinea", "Mauritius", "Eswatini", "Djibouti", "Comoros",
            "Cabo Verde", "São Tomé and Príncipe", "Seychelles",
        ],
    ),
    (
        Region::Oceania,
        &[
            "Australia", "New Zealand", "Papua New Guinea", "Fiji", "Samoa", "Tonga", "Vanuatu",
            "Solomon Islands", "Kiribati", "Tuvalu", "Nauru", "Palau", "Marshall Islands",
            "Micronesia",
        ],
    ),
];

fn normalize(country: &str) -> String {
    country.trim().to_lowercase()
}

/// Maps country names to regions. Unknown countries are `Region::Unclassified`.
#[derive(Debug, Clone)]
pub struct RegionClassifier {
    table: HashMap<String, (String, Region)>,
}

impl RegionClassifier {
    /// Classifier over `DEFAULT_REGION_TABLE`.
    pub fn standard() -> Self {
        let mut table = HashMap::new();
        for (region, countries) in DEFAULT_REGION_TABLE {
            for country in *countries {
                table.insert(normalize(country), (country.to_string(), *region));
            }
        }
        Self { table }
    }

    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Builds a classifier from arbitrary entries, rejecting a country mapped to two regions.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Region)>,
        S: AsRef<str>,
    {
        let mut classifier = Self::empty();
        classifier.extend(entries)?;
        Ok(classifier)
    }

    /// Adds entries. Nothing is added if any entry conflicts with the table or with another entry.
    pub fn extend<I, S>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, Region)>,
        S: AsRef<str>,
    {
        let mut staged = self.table.clone();
        for (country, region) in entries {
            let country = country.as_ref().trim();
            if country.is_empty() {
                return Err(TravelyError::validation("region table entry has an empty country name"));
            }
            if region == Region::Unclassified {
                return Err(TravelyError::validation(format!(
                    "'{}' cannot be mapped to Unclassified explicitly",
                    country
                )));
            }

            match staged.get(&normalize(country)) {
                Some((_, existing)) if *existing != region => {
                    return Err(TravelyError::validation(format!(
                        "'{}' is mapped to both {} and {}",
                        country, existing, region
                    )));
                }
                Some(_) => {
                    tracing::debug!("Duplicate region entry for {} ignored", country);
                }
                None => {
                    staged.insert(normalize(country), (country.to_string(), region));
                }
            }
        }
        self.table = staged;
        Ok(())
    }

    pub fn classify(&self, country: &str) -> Region {
        self.table
            .get(&normalize(country))
            .map(|(_, region)| *region)
            .unwrap_or(Region::Unclassified)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Countries of one region, sorted by name.
    pub fn countries_in(&self, region: Region) -> Vec<&str> {
        let mut countries: Vec<&str> = self
            .table
            .values()
            .filter(|(_, r)| *r == region)
            .map(|(name, _)| name.as_str())
            .collect();
        countries.sort_unstable();
        countries
    }
}

impl Default for RegionClassifier {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_table_lists_each_country_once() {
        let mut seen = HashSet::new();
        for (_, countries) in DEFAULT_REGION_TABLE {
            for country in *countries {
                assert!(seen.insert(normalize(country)), "{} listed twice", country);
            }
        }
    }

    #[test]
    fn test_default_table_is_a_total_function() {
        let classifier = RegionClassifier::standard();
        for (region, countries) in DEFAULT_REGION_TABLE {
            for country in *countries {
                assert_eq!(classifier.classify(country), *region, "{}", country);
            }
        }
        let listed: usize = DEFAULT_REGION_TABLE.iter().map(|(_, c)| c.len()).sum();
        assert_eq!(classifier.len(), listed);
    }

    #[test]
    fn test_previously_ambiguous_countries_are_canonical() {
        let classifier = RegionClassifier::standard();
        assert_eq!(classifier.classify("Australia"), Region::Oceania);
        assert_eq!(classifier.classify("Fiji"), Region::Oceania);
        assert_eq!(classifier.classify("Tunisia"), Region::Africa);
    }

    #[test]
    fn test_unknown_country_is_unclassified() {
        let classifier = RegionClassifier::standard();
        assert_eq!(classifier.classify("Atlantis"), Region::Unclassified);
        assert_eq!(classifier.classify(""), Region::Unclassified);
    }

    #[test]
    fn test_lookup_ignores_case_and_padding() {
        let classifier = RegionClassifier::standard();
        assert_eq!(classifier.classify(" japan "), Region::Asia);
        assert_eq!(classifier.classify("SÃO TOMÉ AND PRÍNCIPE"), Region::Africa);
    }

    #[test]
    fn test_conflicting_entries_are_rejected() {
        let result = RegionClassifier::from_entries([
            ("Australia", Region::Americas),
            ("Australia", Region::Oceania),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut classifier = RegionClassifier::standard();
        let before = classifier.len();
        let result = classifier.extend([("Iceland", Region::Europe), ("Japan", Region::Europe)]);
        assert!(result.is_err());
        assert_eq!(classifier.len(), before);
        assert_eq!(classifier.classify("Iceland"), Region::Unclassified);

        classifier.extend([("Iceland", Region::Europe)]).unwrap();
        assert_eq!(classifier.classify("iceland"), Region::Europe);
    }
}
