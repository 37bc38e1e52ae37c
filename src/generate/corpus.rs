//! Word pools for values the `fake` crate has no equivalent for, e.g. first names split by gender or UK
//! postcode areas. Every pool is non-empty.

pub(super) const MALE_FIRST_NAMES: &[&str] = &[
    "Oliver", "George", "Harry", "Noah", "Jack", "Leo", "Arthur", "Muhammad", "Oscar", "Charlie",
    "Jacob", "Thomas", "Henry", "William", "Joshua", "Freddie", "Alfie", "Theo", "Archie", "Isaac",
    "Samuel", "Joseph", "Reuben", "Ethan", "Rory", "Finley", "Kai", "Zain",
];

pub(super) const FEMALE_FIRST_NAMES: &[&str] = &[
    "Olivia", "Amelia", "Isla", "Ava", "Mia", "Ivy", "Lily", "Isabella", "Rosie", "Sophia",
    "Grace", "Freya", "Willow", "Florence", "Emily", "Ella", "Poppy", "Evie", "Elsie", "Aisha",
    "Harper", "Sienna", "Daisy", "Matilda", "Zara", "Niamh", "Maryam", "Erin",
];

pub(super) const NEUTRAL_FIRST_NAMES: &[&str] = &[
    "Alex", "Charlie", "Jordan", "Robin", "Sam", "Riley", "Jamie", "Morgan", "Rowan", "Avery",
    "Quinn", "Taylor", "Ashley", "Sasha", "Frankie", "Jesse",
];

/// Areas within a team, naming its subteams
pub(super) const LOCALITIES: &[&str] = &[
    "Northside", "Westbury", "Eastfield", "Southgate", "Hillcrest", "Riverside", "Oakwood",
    "Brookfield", "Fairview", "Highfields",
];

pub(super) const POSTCODE_OUTWARD: &[&str] = &[
    "SW1A", "EC1A", "W1A", "N1", "E14", "SE1", "B1", "B15", "LS1", "LS6", "M1", "M20", "BS1",
    "S1", "CV1", "LE1", "NG7", "NE1", "NR2", "EX4", "YO1", "DE1", "CB2", "OX1",
];

/// Letters permitted in the unit part of the inward code
pub(super) const POSTCODE_UNIT_LETTERS: &[u8] = b"ABDEFGHJLNPQRSTUWXYZ";

pub(super) const SCHOOL_STEMS: &[&str] = &[
    "Oakfield", "St Mary's", "Riverside", "Hillside", "Greenway", "Brookside", "Kingsway",
    "Meadowbank", "Holy Trinity", "Ashgrove", "Beacon", "Westfield", "Parkland", "Lakeside",
];

pub(super) const PRIMARY_SCHOOL_KINDS: &[&str] =
    &["Primary School", "Infant School", "Junior School", "C of E Primary School"];

pub(super) const SECONDARY_SCHOOL_KINDS: &[&str] =
    &["Academy", "High School", "School", "Community College", "Grammar School"];

pub(super) const EMAIL_DOMAINS: &[&str] = &["example.com", "example.net", "example.org"];

pub(super) const TEAM_AREAS: &[&str] = &[
    "North", "South", "East", "West", "Central", "Coastal", "Valley", "City",
];

/// Characters for identifiers such as batch names, without easily confused ones
pub(super) const IDENTIFIER_CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
