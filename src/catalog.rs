//! Static reference vocabularies offered to the user as selections.
//!
//! These are lookup tables only. The profile validator consults them to decide
//! whether a selection belongs to its closed set.

/// One row of the job reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobReference {
    pub job: &'static str,
    pub skill: &'static str,
    pub education: &'static str,
    pub personality: &'static str,
}

pub const JOBS: &[JobReference] = &[
    JobReference {
        job: "Software Developer",
        skill: "programming",
        education: "Computer Science",
        personality: "analytical",
    },
    JobReference {
        job: "Data Scientist",
        skill: "analytics",
        education: "Statistics",
        personality: "curious",
    },
    JobReference {
        job: "UX Designer",
        skill: "design",
        education: "Design",
        personality: "creative",
    },
    JobReference {
        job: "Project Manager",
        skill: "leadership",
        education: "Business",
        personality: "organized",
    },
    JobReference {
        job: "Marketing Specialist",
        skill: "communication",
        education: "Marketing",
        personality: "outgoing",
    },
];

pub const COUNTRIES: &[&str] = &[
    "Afghanistan", "Albania", "Algeria", "Andorra", "Angola", "Antigua and Barbuda",
    "Argentina", "Armenia", "Australia", "Austria", "Azerbaijan", "Bahamas",
    "Bahrain", "Bangladesh", "Barbados", "Belarus", "Belgium", "Belize",
    "Benin", "Bhutan", "Bolivia", "Bosnia and Herzegovina", "Botswana", "Brazil",
    "Brunei", "Bulgaria", "Burkina Faso", "Burundi", "Cabo Verde", "Cambodia",
    "Cameroon", "Canada", "Central African Republic", "Chad", "Chile", "China",
    "Colombia", "Comoros", "Congo, Democratic Republic of the", "Congo, Republic of the",
    "Costa Rica", "Croatia", "Cuba", "Cyprus", "Czechia", "Denmark", "Djibouti",
    "Dominica", "Dominican Republic", "Ecuador", "Egypt", "El Salvador", "Equatorial Guinea",
    "Eritrea", "Estonia", "Eswatini", "Ethiopia", "Fiji", "Finland", "France",
    "Gabon", "Gambia", "Georgia", "Germany", "Ghana", "Greece", "Grenada",
    "Guatemala", "Guinea", "Guinea-Bissau", "Guyana", "Haiti", "Honduras",
    "Hungary", "Iceland", "India", "Indonesia", "Iran", "Iraq", "Ireland",
    "Israel", "Italy", "Jamaica", "Japan", "Jordan", "Kazakhstan", "Kenya",
    "Kiribati", "Korea, North", "Korea, South", "Kosovo", "Kuwait", "Kyrgyzstan",
    "Laos", "Latvia", "Lebanon", "Lesotho", "Liberia", "Libya", "Liechtenstein",
    "Lithuania", "Luxembourg", "Madagascar", "Malawi", "Malaysia", "Maldives",
    "Mali", "Malta", "Marshall Islands", "Mauritania", "Mauritius", "Mexico",
    "Micronesia", "Moldova", "Monaco", "Mongolia", "Montenegro", "Morocco",
    "Mozambique", "Myanmar", "Namibia", "Nauru", "Nepal", "Netherlands",
    "New Zealand", "Nicaragua", "Niger", "Nigeria", "North Macedonia", "Norway",
    "Oman", "Pakistan", "Palau", "Palestine", "Panama", "Papua New Guinea",
    "Paraguay", "Peru", "Philippines", "Poland", "Portugal", "Qatar",
    "Romania", "Russia", "Rwanda", "Saint Kitts and Nevis", "Saint Lucia",
    "Saint Vincent and the Grenadines", "Samoa", "San Marino", "Sao Tome and Principe",
    "Saudi Arabia", "Senegal", "Serbia", "Seychelles", "Sierra Leone", "Singapore",
    "Slovakia", "Slovenia", "Solomon Islands", "Somalia", "South Africa", "South Sudan",
    "Spain", "Sri Lanka", "Sudan", "Suriname", "Sweden", "Switzerland", "Syria",
    "Taiwan", "Tajikistan", "Tanzania", "Thailand", "Timor-Leste", "Turkey",
    "Turkmenistan", "Tuvalu", "Uganda", "Ukraine", "United Arab Emirates",
    "United Kingdom", "United States", "Uruguay", "Uzbekistan", "Vanuatu",
    "Vatican City", "Venezuela", "Vietnam", "Yemen", "Zambia", "Zimbabwe",
];

pub fn is_known_education(value: &str) -> bool {
    JOBS.iter().any(|row| row.education == value)
}

pub fn is_known_skill(value: &str) -> bool {
    JOBS.iter().any(|row| row.skill == value)
}

pub fn is_known_personality(value: &str) -> bool {
    JOBS.iter().any(|row| row.personality == value)
}

pub fn is_known_country(value: &str) -> bool {
    COUNTRIES.contains(&value)
}
