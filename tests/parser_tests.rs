// tests/parser_tests.rs

use lime_query::classifier::ClassifyError;
use lime_query::lexer::{LexError, Lexer};
use lime_query::parser::{ParseError, Parser};
use lime_query::xml::{Content, Node};
use lime_query::sql_to_node;

fn parse(sql: &str) -> Node {
    let mut parser = Parser::new(Lexer::new(sql)).unwrap();
    parser.parse().unwrap()
}

fn xml(sql: &str) -> String {
    parse(sql).to_xml()
}

fn conditions(node: &Node) -> Vec<&Node> {
    node.first_child("conditions")
        .map(|c| c.children().iter().collect())
        .unwrap_or_default()
}

// ============================================================================
// Fields and tables
// ============================================================================

#[test]
fn test_simple_select() {
    assert_eq!(
        xml("SELECT a,b FROM t"),
        "<query distinct=\"0\"><tables><table>t</table></tables>\
         <fields><field>a</field><field>b</field></fields></query>"
    );
}

#[test]
fn test_no_conditions_node_without_where() {
    let q = parse("SELECT a, b FROM t");
    assert_eq!(q.attribute("distinct"), Some("0"));
    assert!(q.first_child("conditions").is_none());

    let names: Vec<_> = q
        .first_child("fields")
        .unwrap()
        .children()
        .iter()
        .map(|f| f.text_value().unwrap())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_distinct_and_count() {
    let q = parse("SELECT DISTINCT COUNT id FROM person");
    assert_eq!(q.attribute("distinct"), Some("1"));
    assert_eq!(q.attribute("count"), Some("1"));
    assert_eq!(q.first_child("fields").unwrap().children().len(), 1);
}

#[test]
fn test_dotted_and_backticked_fields() {
    assert_eq!(
        xml("SELECT soscategory.descriptive, `order` FROM t"),
        "<query distinct=\"0\"><tables><table>t</table></tables>\
         <fields><field>soscategory.descriptive</field><field>order</field></fields></query>"
    );
}

#[test]
fn test_last_table_wins() {
    let q = parse("SELECT a FROM t FROM u");
    let tables = q.first_child("tables").unwrap();
    assert_eq!(tables.children().len(), 1);
    assert_eq!(tables.children()[0].text_value(), Some("u"));
}

#[test]
fn test_missing_from_still_emits_tables() {
    assert_eq!(
        xml("SELECT a"),
        "<query distinct=\"0\"><tables><table/></tables>\
         <fields><field>a</field></fields></query>"
    );
}

#[test]
fn test_no_fields_node_without_columns() {
    let q = parse("SELECT FROM t");
    assert!(q.first_child("fields").is_none());
    assert_eq!(q.children().len(), 1);
}

// ============================================================================
// Conditions
// ============================================================================

#[test]
fn test_numeric_condition() {
    assert_eq!(
        xml("SELECT DISTINCT a FROM t WHERE a=1"),
        "<query distinct=\"1\"><tables><table>t</table></tables>\
         <conditions><condition operator=\"=\">\
         <exp type=\"field\">a</exp><exp type=\"numeric\">1</exp>\
         </condition></conditions>\
         <fields><field>a</field></fields></query>"
    );
}

#[test]
fn test_string_and_date_values() {
    let q = parse("SELECT a FROM t WHERE name = 'Alice' AND born < '1990-01-01'");
    let conds = conditions(&q);
    assert_eq!(conds.len(), 2);

    let value = &conds[0].children()[1];
    assert_eq!(value.attribute("type"), Some("string"));
    assert_eq!(value.text_value(), Some("Alice"));

    let value = &conds[1].children()[1];
    assert_eq!(conds[1].attribute("operator"), Some("<"));
    assert_eq!(value.attribute("type"), Some("date"));
    assert_eq!(value.text_value(), Some("1990-01-01"));
}

#[test]
fn test_typehint_overrides_datatype() {
    let q = parse("SELECT a FROM t WHERE active = '1':numeric AND d > '2014-01-01':datetime");
    let conds = conditions(&q);

    assert_eq!(conds[0].children()[1].attribute("type"), Some("numeric"));
    assert_eq!(conds[0].children()[1].text_value(), Some("1"));
    assert_eq!(conds[1].children()[1].attribute("type"), Some("datetime"));
}

#[test]
fn test_like_wildcards_fold_into_operator() {
    let test_cases = vec![
        ("'%foo%'", "%like%", Some("foo")),
        ("'foo%'", "like%", Some("foo")),
        ("'%foo'", "%like", Some("foo")),
        ("'foo'", "like", Some("foo")),
        ("'%'", "%like", None),
        ("''", "like", None),
    ];

    for (literal, operator, value) in test_cases {
        let q = parse(&format!("SELECT a FROM t WHERE name LIKE {}", literal));
        let cond = conditions(&q)[0];
        assert_eq!(cond.attribute("operator"), Some(operator), "Failed for {}", literal);
        assert_eq!(cond.children()[1].text_value(), value, "Failed for {}", literal);
    }
}

#[test]
fn test_two_word_operators() {
    let q = parse("SELECT a FROM t WHERE name NOT LIKE '%x%' AND deleted IS NOT 1");
    let conds = conditions(&q);

    // Only a plain `like` folds wildcards
    assert_eq!(conds[0].attribute("operator"), Some("not like"));
    assert_eq!(conds[0].children()[1].text_value(), Some("%x%"));
    assert_eq!(conds[1].attribute("operator"), Some("is not"));
    assert_eq!(conds[1].children()[1].attribute("type"), Some("numeric"));
}

#[test]
fn test_or_marks_the_following_condition() {
    let q = parse("SELECT a FROM t WHERE x = 1 AND y = 2 OR z = 3");
    let conds = conditions(&q);

    assert_eq!(conds.len(), 3);
    assert_eq!(conds[0].attribute("or"), None);
    assert_eq!(conds[1].attribute("or"), None);
    assert_eq!(conds[2].attribute("or"), Some("1"));
}

#[test]
fn test_groups() {
    assert_eq!(
        xml("SELECT a FROM t WHERE x = 1 OR (y = 2 AND z = 3)"),
        "<query distinct=\"0\"><tables><table>t</table></tables><conditions>\
         <condition operator=\"=\"><exp type=\"field\">x</exp><exp type=\"numeric\">1</exp></condition>\
         <condition or=\"1\"><exp type=\"(\"/></condition>\
         <condition operator=\"=\"><exp type=\"field\">y</exp><exp type=\"numeric\">2</exp></condition>\
         <condition operator=\"=\"><exp type=\"field\">z</exp><exp type=\"numeric\">3</exp></condition>\
         <condition><exp type=\")\"/></condition>\
         </conditions><fields><field>a</field></fields></query>"
    );
}

#[test]
fn test_group_marker_content() {
    let q = parse("SELECT a FROM t WHERE (x = 1)");
    let marker = &conditions(&q)[0].children()[0];

    assert_eq!(marker.name(), "exp");
    assert_eq!(marker.attribute("type"), Some("("));
    assert_eq!(marker.content(), &Content::Empty);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_order_by_desc_with_limit() {
    let q = parse("SELECT a FROM t ORDER BY a DESC LIMIT 0,5");

    assert_eq!(q.attribute("first"), Some("0"));
    assert_eq!(q.attribute("top"), Some("5"));

    let field = &q.first_child("fields").unwrap().children()[0];
    assert_eq!(field.attribute("sortorder"), Some("desc"));
    assert_eq!(field.attribute("sortindex"), Some("1"));
    assert_eq!(field.text_value(), Some("a"));
}

#[test]
fn test_sort_order_defaults_to_asc() {
    assert_eq!(
        xml("SELECT a, b FROM t ORDER BY b, a"),
        "<query distinct=\"0\"><tables><table>t</table></tables><fields>\
         <field sortorder=\"asc\" sortindex=\"2\">a</field>\
         <field sortorder=\"asc\" sortindex=\"1\">b</field>\
         </fields></query>"
    );
}

#[test]
fn test_explicit_asc() {
    let q = parse("SELECT a FROM t ORDER BY a ASC");
    let field = &q.first_child("fields").unwrap().children()[0];
    assert_eq!(field.attribute("sortorder"), Some("asc"));
}

#[test]
fn test_sort_key_not_selected_is_ignored() {
    assert_eq!(
        xml("SELECT a FROM t ORDER BY x"),
        "<query distinct=\"0\"><tables><table>t</table></tables>\
         <fields><field>a</field></fields></query>"
    );
}

#[test]
fn test_unsorted_fields_stay_plain() {
    let q = parse("SELECT a, b, c FROM t ORDER BY b DESC");
    let fields = q.first_child("fields").unwrap().children();

    assert!(fields[0].attributes().is_empty());
    assert_eq!(fields[1].attribute("sortindex"), Some("1"));
    assert!(fields[2].attributes().is_empty());
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn test_single_limit_is_top() {
    let q = parse("SELECT a FROM t LIMIT 10");
    assert_eq!(q.attribute("top"), Some("10"));
    assert_eq!(q.attribute("first"), None);
}

#[test]
fn test_limit_with_offset() {
    let q = parse("SELECT a FROM t LIMIT 20, 10");
    assert_eq!(q.attribute("first"), Some("20"));
    assert_eq!(q.attribute("top"), Some("10"));
}

#[test]
fn test_root_attribute_order() {
    let q = parse("SELECT DISTINCT COUNT a FROM t LIMIT 5, 10");
    let keys: Vec<_> = q.attributes().iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["distinct", "count", "top", "first"]);
}

// ============================================================================
// Complete queries
// ============================================================================

#[test]
fn test_multiline_query() {
    let sql = "SELECT DISTINCT\n\
               \x20      idsostype, descriptive, soscategory, soscategory.sosbusinessarea,\n\
               \x20      webcompany, webperson, web, department, name\n\
               FROM   sostype\n\
               WHERE  active='1':numeric AND\n\
               \x20      soscategory.sosbusinessarea != 2701 AND\n\
               \x20      web=1 AND (webperson=1 OR webcompany=1)\n\
               ORDER BY descriptive, soscategory DESC\n\
               LIMIT  0, 5";

    let expected = "<query distinct=\"1\" top=\"5\" first=\"0\">\
        <tables><table>sostype</table></tables>\
        <conditions>\
        <condition operator=\"=\"><exp type=\"field\">active</exp><exp type=\"numeric\">1</exp></condition>\
        <condition operator=\"!=\"><exp type=\"field\">soscategory.sosbusinessarea</exp><exp type=\"numeric\">2701</exp></condition>\
        <condition operator=\"=\"><exp type=\"field\">web</exp><exp type=\"numeric\">1</exp></condition>\
        <condition><exp type=\"(\"/></condition>\
        <condition operator=\"=\"><exp type=\"field\">webperson</exp><exp type=\"numeric\">1</exp></condition>\
        <condition operator=\"=\" or=\"1\"><exp type=\"field\">webcompany</exp><exp type=\"numeric\">1</exp></condition>\
        <condition><exp type=\")\"/></condition>\
        </conditions>\
        <fields>\
        <field>idsostype</field>\
        <field sortorder=\"desc\" sortindex=\"1\">descriptive</field>\
        <field sortorder=\"desc\" sortindex=\"2\">soscategory</field>\
        <field>soscategory.sosbusinessarea</field>\
        <field>webcompany</field>\
        <field>webperson</field>\
        <field>web</field>\
        <field>department</field>\
        <field>name</field>\
        </fields></query>";

    assert_eq!(xml(sql), expected);
}

#[test]
fn test_every_valid_query_has_one_tables_node() {
    let queries = vec![
        "SELECT a FROM t",
        "SELECT a",
        "SELECT DISTINCT a, b FROM t WHERE a = 1",
        "SELECT COUNT a FROM t WHERE (a = 1 OR b = 'x') ORDER BY a LIMIT 3",
        "SELECT a FROM t FROM u",
        "",
    ];

    for sql in queries {
        let q = parse(sql);
        assert_eq!(q.name(), "query");
        assert_eq!(q.children_by_name("tables").len(), 1, "Failed for: {}", sql);
    }
}

#[test]
fn test_parse_is_repeatable() {
    let mut parser = Parser::new(Lexer::new("SELECT a FROM t WHERE a = 1")).unwrap();
    let first = parser.parse().unwrap();
    let second = parser.parse().unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_sort_order_without_keys() {
    let result = sql_to_node("SELECT a FROM t DESC");
    assert_eq!(
        result,
        Err(ParseError::NoSortBase {
            order: "DESC".to_string()
        })
    );
}

#[test]
fn test_expected_value() {
    let result = sql_to_node("SELECT a FROM t WHERE a = (");
    assert_eq!(
        result,
        Err(ParseError::ExpectedValue {
            field: "a".to_string(),
            found: Some("(".to_string()),
        })
    );
}

#[test]
fn test_expected_value_at_end_of_query() {
    let result = sql_to_node("SELECT a FROM t WHERE a =");
    assert_eq!(
        result,
        Err(ParseError::ExpectedValue {
            field: "a".to_string(),
            found: None,
        })
    );

    let result = sql_to_node("SELECT a FROM t WHERE a");
    assert!(matches!(result, Err(ParseError::ExpectedValue { found: None, .. })));
}

#[test]
fn test_unterminated_literal_aborts_parse() {
    let result = sql_to_node("SELECT a FROM t WHERE name='unterminated");
    assert_eq!(
        result,
        Err(ParseError::Lex(LexError::UnterminatedLiteral {
            offset: 27,
            excerpt: "'unterminated".to_string(),
        }))
    );
}

#[test]
fn test_unresolved_token_aborts_parse() {
    let result = sql_to_node("SELECT a FROM t u");
    assert_eq!(
        result,
        Err(ParseError::Classify(ClassifyError::UnresolvedToken {
            token: "u".to_string(),
            previous: Some("t".to_string()),
        }))
    );
}

#[test]
fn test_error_source_chain() {
    use std::error::Error;

    let err = sql_to_node("SELECT a FROM t u").unwrap_err();
    assert!(err.source().is_some());

    let err = sql_to_node("SELECT a FROM t DESC").unwrap_err();
    assert!(err.source().is_none());
    assert!(err.to_string().contains("no fields to sort on"));
}
