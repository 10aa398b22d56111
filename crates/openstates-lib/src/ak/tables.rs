// ABOUTME: Alaska Legislature lookup tables for action text
// ABOUTME: Committee codes, fiscal note departments and committee vote types

/// Ordered code -> name table
pub type CodeTable = &'static [(&'static str, &'static str)];

/// Fiscal note department codes
pub const FISCAL_DEPARTMENTS: CodeTable = &[
    ("ADM", "Administration"),
    ("CED", "Commerce, Community & Economic Development"),
    ("COR", "Corrections"),
    ("CRT", "Court System"),
    ("EED", "Education and Early Development"),
    ("DEC", "Environmental Conservation "),
    ("DFG", "Fish and Game"),
    ("GOV", "Governor's Office"),
    ("DHS", "Health and Social Services"),
    ("LWF", "Labor and Workforce Development"),
    ("LAW", "Law"),
    ("LEG", "Legislative Agency"),
    ("MVA", "Military and Veterans' Affairs"),
    ("DNR", "Natural Resources"),
    ("DPS", "Public Safety"),
    ("REV", "Revenue"),
    ("DOT", "Transportation and Public Facilities"),
    ("UA", "University of Alaska"),
    ("ALL", "All Departments"),
];

/// Committee report recommendation codes
pub const COMMITTEE_VOTE_TYPES: CodeTable = &[
    ("DP", "Do Pass"),
    ("DNP", "Do Not Pass"),
    ("NR", "No Recommendation"),
    ("AM", "Amend"),
];

/// Standing, special and joint committee codes
pub const COMMITTEES: CodeTable = &[
    ("AET", "Arctic Policy, Economic Development, & Tourism"),
    ("CRA", "Community & Regional Affairs"),
    ("EDC", "Education"),
    ("FIN", "Finance"),
    ("HSS", "Health & Social Services"),
    ("JUD", "Judiciary"),
    ("L&C", "Labor & Commerce"),
    ("RES", "Resources"),
    ("RLS", "Rules"),
    ("STA", "State Affairs"),
    ("TRA", "Transportation"),
    ("EDT", "Economic Development, Trade & Tourism"),
    ("NRG", "Energy"),
    ("FSH", "Fisheries"),
    ("MLV", "Military & Veterans"),
    ("WTR", "World Trade"),
    ("ARR", "Administrative Regulation Review"),
    ("ASC", "Armed Services Committee"),
    ("BUD", "Legislative Budget & Audit"),
    ("ECR", "Higher Education/Career Readiness Task Force"),
    ("EFF", "Education Fuding District Cost Factor Committee"),
    ("ETH", "Select Committee on Legislative Ethics"),
    ("LEC", "Legislative Council"),
    ("ARC", "Special Committee on the Arctic"),
    ("EDA", "Economic Development, Trade, Tourism & Arctic Policy"),
    ("ENE", "Energy"),
];

/// Look `key` up in `table`, falling back to the key itself
pub fn lookup_or_default<'a>(table: &'a [(&'a str, &'a str)], key: &'a str) -> &'a str {
    table
        .iter()
        .find(|(code, _)| *code == key)
        .map_or(key, |(_, name)| name)
}
