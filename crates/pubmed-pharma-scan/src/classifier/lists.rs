//! Production match tables for affiliation classification.
//!
//! Consumed only through [`ClassifierRules::default`]; tests inject
//! their own small tables instead.
//!
//! [`ClassifierRules::default`]: super::ClassifierRules::default

/// Substrings marking an affiliation as academic/clinical. Checked first
/// and authoritative over any company match in the same string.
pub(super) const ACADEMIC_MARKERS: &[&str] = &[
    "university",
    "college",
    "institute of technology",
    "polytechnic",
    "hospital",
    "school of medicine",
    "medical school",
    "medical center",
    "medical centre",
    "cancer center",
    "cancer centre",
    "research institute",
    "academy of",
    "academia",
    "faculty of",
    "department of",
    "clinic",
    "health system",
    "school of public health",
    "veterans affairs",
    "national institutes of health",
    "ministry of health",
];

/// Known pharmaceutical and biotech companies. A match records the
/// canonical (title-cased) entry as the company name.
pub(super) const KNOWN_COMPANIES: &[&str] = &[
    // Big pharma
    "pfizer",
    "johnson & johnson",
    "janssen",
    "roche",
    "novartis",
    "merck",
    "abbvie",
    "bristol-myers squibb",
    "astrazeneca",
    "glaxosmithkline",
    "gsk",
    "sanofi",
    "takeda",
    "boehringer ingelheim",
    "eli lilly",
    "amgen",
    "gilead",
    "biogen",
    "celgene",
    "regeneron",
    "vertex",
    "alexion",
    "incyte",
    "teva",
    "viatris",
    "sandoz",
    "bayer",
    "servier",
    "novo nordisk",
    "lundbeck",
    "leo pharma",
    "ferring",
    "ucb",
    // Japan
    "otsuka",
    "daiichi sankyo",
    "eisai",
    "astellas",
    "chugai",
    "shionogi",
    "ono pharmaceutical",
    "kyowa kirin",
    // India
    "dr. reddy",
    "sun pharma",
    "lupin",
    "cipla",
    "aurobindo",
    "zydus",
    "biocon",
    "glenmark",
    // China
    "sinopharm",
    "jiangsu hengrui",
    "beigene",
    "wuxi biologics",
    "wuxi apptec",
    "innovent",
    "sinovac",
    "fosun pharma",
    // Biotech
    "genentech",
    "moderna",
    "biontech",
    "curevac",
    "illumina",
    "seagen",
    "bluebird bio",
    "crispr therapeutics",
    "editas",
    "intellia",
    "sangamo",
    "spark therapeutics",
    "biomarin",
    "sarepta",
    "ionis",
    "alnylam",
    "arrowhead",
    "kite pharma",
    "juno therapeutics",
    "legend biotech",
    "cellectis",
    "adaptimmune",
    "iovance",
    "uniqure",
    "regenxbio",
    "ultragenyx",
    "amicus",
    "gritstone",
    "adaptive biotechnologies",
    "inovio",
    "agenus",
    "seres",
    "vedanta",
];

/// Fallback keywords marking an otherwise-unmatched affiliation as
/// industry; the affiliation itself (normalized) becomes the company
/// identifier.
pub(super) const INDUSTRY_KEYWORDS: &[&str] = &[
    "pharmaceutical",
    "pharmaceuticals",
    "pharma",
    "biotech",
    "biotechnology",
    "biopharmaceutical",
    "biopharma",
    "therapeutics",
    "life sciences",
    "biosciences",
    "drug discovery",
    "drug development",
    "clinical development",
    "medical affairs",
    "translational medicine",
    "inc.",
    "corp",
    "ltd",
    "llc",
    "gmbh",
];
