//! Documentation content for limeq CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Conditions,
    Sorting,
    Limits,
    Types,
    Wire,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "select" => Some(Self::Syntax),
            "conditions" | "condition" | "where" => Some(Self::Conditions),
            "sorting" | "sort" | "order_by" => Some(Self::Sorting),
            "limits" | "limit" => Some(Self::Limits),
            "types" | "type" | "typehints" => Some(Self::Types),
            "wire" | "xml" | "output" => Some(Self::Wire),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"LIMEQ DOCUMENTATION

limeq translates a small SQL dialect into the XML query documents accepted by
the Lime Pro GetXmlQueryData web service, and reads XML responses back.

DOCUMENTATION CATEGORIES

  syntax            SELECT, DISTINCT, COUNT and FROM
  conditions        WHERE clauses, AND/OR, groups and LIKE wildcards
  sorting           ORDER BY keys and direction
  limits            LIMIT with count and offset
  types             Value datatypes and :type hints
  wire              The XML document produced by translate

QUICK REFERENCE

  SELECT [DISTINCT] [COUNT] col, ... FROM table
    [WHERE pred [AND|OR pred | (group)] ...]
    [ORDER BY col [ASC|DESC], ...]
    [LIMIT [offset,] count]

Run 'limeq doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Conditions) => Ok(CONDITIONS_DOC),
        Some(DocCategory::Sorting) => Ok(SORTING_DOC),
        Some(DocCategory::Limits) => Ok(LIMITS_DOC),
        Some(DocCategory::Types) => Ok(TYPES_DOC),
        Some(DocCategory::Wire) => Ok(WIRE_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Selecting Fields

SELECT
  SELECT name, email FROM person
    Fields become <field> elements in the order they are listed.
    Commas are optional separators.

DISTINCT
  SELECT DISTINCT name FROM person
    Sets distinct="1" on the query. Without it, distinct="0".

COUNT
  SELECT COUNT id FROM person
    Sets count="1" on the query.

FROM
  ... FROM person
    Names the table. If FROM is repeated the last table wins.

IDENTIFIERS
  Field names may contain letters, digits and '.', so related fields
  are written as soscategory.descriptive. Quote a name with backticks
  to use a reserved word: SELECT `order` FROM invoice
"#;

const CONDITIONS_DOC: &str = r#"CONDITIONS - WHERE Clauses

COMPARISONS
  =  !=  <  >  <=  >=  is  like  in  not  any  all

  Examples:
    WHERE active = 1
    WHERE name != 'Alice'
    WHERE deleted IS NOT 1

  Two operators in a row are combined: 'is not', 'not like'.

AND / OR
  WHERE a = 1 AND b = 2 OR c = 3
    A condition following OR carries or="1".

GROUPS
  WHERE web = 1 AND (webperson = 1 OR webcompany = 1)
    Parentheses become marker conditions: <exp type="("/> and <exp type=")"/>.

LIKE WILDCARDS
  WHERE name LIKE '%son'     operator="%like"
  WHERE name LIKE 'An%'      operator="like%"
  WHERE name LIKE '%nn%'     operator="%like%"
    The % markers move from the value onto the operator.
"#;

const SORTING_DOC: &str = r#"SORTING - ORDER BY

  SELECT name, city FROM person ORDER BY city, name DESC

  Each key gets sortindex 1, 2, ... in the order listed. A single ASC or
  DESC applies to the whole clause; the default is asc.

  Only selected fields can be sorted: keys that are not in the SELECT list
  are ignored.

  ASC or DESC before any key is an error.
"#;

const LIMITS_DOC: &str = r#"LIMITS - LIMIT

  LIMIT 10        top="10"
  LIMIT 20, 10    first="20" top="10"   (skip 20 rows, return 10)
"#;

const TYPES_DOC: &str = r#"TYPES - Value Datatypes

  'text' or "text"        string
  '2014-03-01'            date (any value containing YYYY-MM-DD)
  42                      numeric (any other bare value)

TYPE HINTS
  Append :type to override the detected type:

    WHERE active = '1':numeric
"#;

const WIRE_DOC: &str = r#"WIRE - XML Query Document

  <query distinct="0|1" [count="1"] [top="N"] [first="M"]>
    <tables><table>NAME</table></tables>
    <conditions>
      <condition operator="OP" [or="1"]>
        <exp type="field">NAME</exp>
        <exp type="numeric|string|date|hint">VALUE</exp>
      </condition>
    </conditions>
    <fields>
      <field [sortorder="asc|desc"] [sortindex="N"]>NAME</field>
    </fields>
  </query>

  'limeq translate' prints this document; 'limeq read' parses XML documents
  such as service responses and prints them back as XML or JSON.
"#;
