mod common;

use common::{company_cells, gasag_page, result_row, results_page};
use handelsregister::{HistoryEntry, RegisterError, RowPolicy, parse_results, parse_results_with};

#[test]
fn every_data_row_becomes_one_record() {
    let rows: Vec<String> = (0..25)
        .map(|i| {
            result_row(
                &i.to_string(),
                &company_cells(&format!("Berlin HRB {i}"), &format!("Firma {i} GmbH"), "Berlin", "aktuell", &[]),
            )
        })
        .collect();

    let records = parse_results(&results_page(&rows)).unwrap();

    assert_eq!(records.len(), 25);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.name, format!("Firma {i} GmbH"));
        assert_eq!(record.court, format!("Berlin HRB {i}"));
        assert_eq!(record.state, "Berlin");
        assert_eq!(record.status, "aktuell");
        assert_eq!(record.documents, "ADCDHDDKUTVÖSI");
    }
}

#[test]
fn records_follow_row_index_not_document_order() {
    let rows: Vec<String> = [2, 0, 1]
        .iter()
        .map(|i| {
            result_row(
                &i.to_string(),
                &company_cells("Amtsgericht", &format!("Firma {i}"), "Bayern", "aktuell", &[]),
            )
        })
        .collect();

    let records = parse_results(&results_page(&rows)).unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();

    assert_eq!(names, ["Firma 0", "Firma 1", "Firma 2"]);
}

#[test]
fn row_index_ordering_is_numeric() {
    let rows: Vec<String> = [10, 9]
        .iter()
        .map(|i| result_row(&i.to_string(), &company_cells("c", &format!("n{i}"), "s", "st", &[])))
        .collect();

    let records = parse_results(&results_page(&rows)).unwrap();
    assert_eq!(records.first().unwrap().name, "n9");
}

#[test]
fn eight_cells_give_a_record_without_history() {
    let cells = company_cells("Hamburg HRB 1", "Nord AG", "Hamburg", "aktuell", &[]);
    assert_eq!(cells.len(), 8);

    let records = parse_results(&results_page(&[result_row("0", &cells)])).unwrap();
    assert!(records.first().unwrap().history.is_empty());
}

#[test]
fn seven_cells_are_a_malformed_row() {
    let mut cells = company_cells("Hamburg HRB 1", "Nord AG", "Hamburg", "aktuell", &[]);
    cells.pop();

    let err = parse_results(&results_page(&[result_row("3", &cells)])).unwrap_err();

    match err {
        RegisterError::MalformedRow { row, cell_count, .. } => {
            assert_eq!(row, "3");
            assert_eq!(cell_count, 7);
        }
        other => panic!("expected malformed row, got {other:?}"),
    }
}

#[test]
fn trailing_triples_become_history_in_order() {
    let history = [
        ("1.) Alte Firma AG", "1.) Köln"),
        ("2.) Ältere Firma AG", "2.) Bonn"),
        ("3.) Urfirma", "3.) Aachen"),
    ];
    let cells = company_cells("Köln HRB 9", "Neue Firma AG", "Nordrhein-Westfalen", "aktuell", &history);

    let records = parse_results(&results_page(&[result_row("0", &cells)])).unwrap();
    let expected: Vec<HistoryEntry> = history
        .iter()
        .map(|(name, location)| HistoryEntry {
            name: (*name).to_string(),
            location: (*location).to_string(),
        })
        .collect();

    assert_eq!(records.first().unwrap().history, expected);
}

#[test]
fn rows_without_row_index_are_skipped() {
    let page = results_page(&[
        r#"<tr class="ui-datatable-subtable-header"><td colspan="8">Registergericht</td></tr>"#.to_string(),
        result_row("0", &company_cells("c", "Only AG", "s", "st", &[])),
    ]);

    let records = parse_results(&page).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records.first().unwrap().name, "Only AG");
}

#[test]
fn ambiguous_keywords_return_every_row() {
    let records = parse_results(&gasag_page()).unwrap();

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Gasag AG", "GASAG Solution Plus GmbH"]);
    assert_eq!(records.first().unwrap().history.len(), 1);
}

#[test]
fn page_without_grid_is_a_structure_error() {
    let err = parse_results("<html><body><h1>Fehler</h1></body></html>").unwrap_err();
    assert!(matches!(err, RegisterError::Structure(_)));
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn skip_policy_keeps_well_formed_rows_in_order() {
    let mut short = company_cells("c", "Broken", "s", "st", &[]);
    short.truncate(5);
    let page = results_page(&[
        result_row("2", &company_cells("c", "Third", "s", "st", &[])),
        result_row("1", &short),
        result_row("0", &company_cells("c", "First", "s", "st", &[])),
    ]);

    assert!(parse_results(&page).is_err());

    let records = parse_results_with(&page, RowPolicy::SkipMalformed).unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["First", "Third"]);
}

#[test]
fn json_output_is_an_array_of_records() {
    let records = parse_results(&gasag_page()).unwrap();
    let json: serde_json::Value = serde_json::to_value(&records).unwrap();

    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["name"], "Gasag AG");
    assert_eq!(json[0]["history"][0]["location"], "1.) Berlin");
}
