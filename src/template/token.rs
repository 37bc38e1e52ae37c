//! Module defining the `<<TOKEN>>` grammar of templates: splitting text into literals and tokens, and the closed set of known tokens.

const OPEN: &str = "<<";
const CLOSE: &str = ">>";

/// A piece of template text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Literal(&'a str),
    /// Token name without the delimiters
    Token(&'a str),
}

/// Splits `text` into literals and tokens in a single left-to-right pass.
///
/// A token is `<<` followed by one or more of `A-Z`, `0-9`, `_` and closed by `>>`. Anything else, including an
/// unclosed `<<`, stays literal text.
pub(crate) fn tokenize(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(OPEN) {
        let open = cursor + offset;
        let name_start = open + OPEN.len();
        let Some(name_len) = text[name_start..].find(CLOSE) else {
            break;
        };

        let name = &text[name_start..name_start + name_len];
        if is_token_name(name) {
            if literal_start < open {
                segments.push(Segment::Literal(&text[literal_start..open]));
            }
            segments.push(Segment::Token(name));
            cursor = name_start + name_len + CLOSE.len();
            literal_start = cursor;
        } else {
            // `<` is a single byte; retry from the next position to catch e.g. `<<<ORG_CODE>>`
            cursor = open + 1;
        }
    }

    if literal_start < text.len() {
        segments.push(Segment::Literal(&text[literal_start..]));
    }
    segments
}

fn is_token_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

/// How often a token is resolved during one render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Once per test run: the same value wherever the token appears
    Render,
    /// Freshly for every occurrence
    Occurrence,
}

/// Field of a pre-generated child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ChildField {
    FirstName,
    LastName,
    NhsNumber,
    DateOfBirth,
    YearGroup,
    AddressLine1,
    AddressLine2,
    Town,
    Postcode,
    /// Parents are numbered from 1, as in import file columns
    ParentName(usize),
    ParentRelationship(usize),
    ParentEmail(usize),
}

/// All tokens a template may contain. Children, schools and clinics are indexed from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Token {
    OrgCode,
    SchoolName(usize),
    SchoolUrn(usize),
    SessionId,
    VaccsDate,
    HistVaccsDate,
    FixedYearGroup,
    DobYear(u8),
    Child { index: usize, field: ChildField },
    Clinic(usize),
    NurseEmail,
    BatchName,

    RandomFirstName,
    RandomLastName,
    RandomNhsNumber,
    InvalidNhsNumber,
    RandomPostcode,
    FixedYearGroupDob,
}

impl Token {
    /// Maps a token name to its token, `None` for names outside the grammar
    pub(crate) fn parse(name: &str) -> Option<Self> {
        let token = match name {
            "ORG_CODE" => Token::OrgCode,
            "SESSION_ID" => Token::SessionId,
            "VACCS_DATE" => Token::VaccsDate,
            "HIST_VACCS_DATE" => Token::HistVaccsDate,
            "FIXED_YEAR_GROUP" => Token::FixedYearGroup,
            "NURSE_EMAIL" => Token::NurseEmail,
            "BATCH_NAME" => Token::BatchName,
            "RANDOM_FNAME" => Token::RandomFirstName,
            "RANDOM_LNAME" => Token::RandomLastName,
            "RANDOM_NHS_NO" => Token::RandomNhsNumber,
            "INVALID_NHS_NO" => Token::InvalidNhsNumber,
            "RANDOM_POSTCODE" => Token::RandomPostcode,
            "FIXED_YEAR_GROUP_DOB" => Token::FixedYearGroupDob,
            _ => return Self::parse_indexed(name),
        };
        Some(token)
    }

    fn parse_indexed(name: &str) -> Option<Self> {
        if let Some(rest) = name.strip_prefix("SCHOOL_") {
            let (index, field) = rest.split_once('_')?;
            let index = index.parse().ok()?;
            return match field {
                "NAME" => Some(Token::SchoolName(index)),
                "URN" => Some(Token::SchoolUrn(index)),
                _ => None,
            };
        }
        if let Some(year) = name.strip_prefix("DOB_YEAR_") {
            return year.parse().ok().map(Token::DobYear);
        }
        if let Some(index) = name.strip_prefix("CLINIC_") {
            return index.parse().ok().map(Token::Clinic);
        }
        if let Some(rest) = name.strip_prefix("CHILD_") {
            let (index, field) = rest.split_once('_')?;
            let index = index.parse().ok()?;
            let field = ChildField::parse(field)?;
            return Some(Token::Child { index, field });
        }
        None
    }

    pub(crate) fn scope(self) -> Scope {
        match self {
            Token::RandomFirstName
            | Token::RandomLastName
            | Token::RandomNhsNumber
            | Token::InvalidNhsNumber
            | Token::RandomPostcode
            | Token::FixedYearGroupDob => Scope::Occurrence,
            _ => Scope::Render,
        }
    }
}

impl ChildField {
    fn parse(field: &str) -> Option<Self> {
        let field = match field {
            "FIRST_NAME" => ChildField::FirstName,
            "LAST_NAME" => ChildField::LastName,
            "NHS_NO" => ChildField::NhsNumber,
            "DOB" => ChildField::DateOfBirth,
            "YEAR_GROUP" => ChildField::YearGroup,
            "ADDRESS_LINE_1" => ChildField::AddressLine1,
            "ADDRESS_LINE_2" => ChildField::AddressLine2,
            "TOWN" => ChildField::Town,
            "POSTCODE" => ChildField::Postcode,
            _ => {
                let rest = field.strip_prefix("PARENT_")?;
                let (number, parent_field) = rest.split_once('_')?;
                let number = number.parse().ok()?;
                return match parent_field {
                    "NAME" => Some(ChildField::ParentName(number)),
                    "RELATIONSHIP" => Some(ChildField::ParentRelationship(number)),
                    "EMAIL" => Some(ChildField::ParentEmail(number)),
                    _ => None,
                };
            }
        };
        Some(field)
    }
}
