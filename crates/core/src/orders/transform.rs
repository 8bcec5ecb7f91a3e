use crate::config::OrdersConfig;
use crate::workbook::{cell, Table};

use super::{OrdersError, PhotoOrder, PhotoUrlTemplate};

/// Keep the rows whose flag cell equals the configured flag value.
///
/// The comparison is exact and case-sensitive. The width check runs before
/// any row is looked at, so a narrow report fails even when it has no rows.
pub fn extract_photo_orders(
    table: &Table,
    cycle: &str,
    config: &OrdersConfig,
    template: &PhotoUrlTemplate,
) -> Result<Vec<PhotoOrder>, OrdersError> {
    if table.width() < config.min_columns {
        return Err(OrdersError::TooFewColumns {
            found: table.width(),
            required: config.min_columns,
        });
    }

    let [col_a, col_b, col_c] = config.identifier_columns;
    let orders = table
        .rows
        .iter()
        .filter(|row| cell(row, config.flag_column) == config.flag_value)
        .map(|row| {
            let (a, b, c) = (cell(row, col_a), cell(row, col_b), cell(row, col_c));
            PhotoOrder {
                cycle: cycle.to_string(),
                a: a.to_string(),
                b: b.to_string(),
                c: c.to_string(),
                photo_url: template.render(a, b, c),
                row: row.clone(),
            }
        })
        .collect();

    Ok(orders)
}

/// Headers of the identifier columns.
pub fn identifier_headers(table: &Table, config: &OrdersConfig) -> [String; 3] {
    config
        .identifier_columns
        .map(|col| cell(&table.headers, col).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: usize = 26;

    fn row(a: &str, b: &str, c: &str, flag: &str) -> Vec<String> {
        let mut row = vec![String::new(); WIDTH];
        row[0] = a.to_string();
        row[1] = b.to_string();
        row[2] = c.to_string();
        row[3] = "extra".to_string();
        row[25] = flag.to_string();
        row
    }

    fn table(rows: Vec<Vec<String>>) -> Table {
        let mut headers: Vec<String> = (0..WIDTH).map(|i| format!("col{}", i)).collect();
        headers[0] = "Suministro".to_string();
        headers[1] = "Unidad".to_string();
        headers[2] = "Orden".to_string();
        Table { headers, rows }
    }

    fn extract(table: &Table) -> Result<Vec<PhotoOrder>, OrdersError> {
        extract_photo_orders(
            table,
            "101",
            &OrdersConfig::default(),
            &PhotoUrlTemplate::default(),
        )
    }

    #[test]
    fn test_keeps_only_flagged_rows() {
        let table = table(vec![
            row("12345", "UNIT001", "7", "ver foto"),
            row("22222", "UNIT002", "8", ""),
            row("33333", "UNIT003", "9", "sin foto"),
        ]);

        let orders = extract(&table).unwrap();
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.cycle, "101");
        assert_eq!((order.a.as_str(), order.b.as_str(), order.c.as_str()), ("12345", "UNIT001", "7"));
        assert_eq!(
            order.photo_url,
            "https://d3jgwc2y5nosue.cloudfront.net/repartos/UNIT001/12/UNIT001_12_7.png"
        );
        assert_eq!(order.row.len(), WIDTH);
        assert_eq!(order.row[3], "extra");
    }

    #[test]
    fn test_flag_match_is_exact_and_case_sensitive() {
        let table = table(vec![
            row("1", "U", "1", "Ver foto"),
            row("2", "U", "2", "VER FOTO"),
            row("3", "U", "3", " ver foto"),
            row("4", "U", "4", "ver foto "),
            row("5", "U", "5", "ver foto"),
        ]);

        let orders = extract(&table).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].a, "5");
    }

    #[test]
    fn test_blank_b_gives_empty_url() {
        let table = table(vec![row("12345", "  ", "7", "ver foto")]);
        let orders = extract(&table).unwrap();
        assert_eq!(orders[0].photo_url, "");
    }

    #[test]
    fn test_too_few_columns_fails_before_filtering() {
        let narrow = Table {
            headers: (0..25).map(|i| i.to_string()).collect(),
            rows: vec![],
        };

        let result = extract(&narrow);
        assert!(matches!(
            result,
            Err(OrdersError::TooFewColumns { found: 25, required: 26 })
        ));
    }

    #[test]
    fn test_no_flagged_rows_is_empty_not_error() {
        let table = table(vec![row("1", "U", "1", "")]);
        assert!(extract(&table).unwrap().is_empty());
    }

    #[test]
    fn test_custom_column_mapping() {
        let config = OrdersConfig {
            identifier_columns: [2, 1, 0],
            flag_column: 3,
            min_columns: 4,
            flag_value: "extra".to_string(),
            ..OrdersConfig::default()
        };
        let table = table(vec![row("A1", "B1", "C1", "")]);

        let orders =
            extract_photo_orders(&table, "9", &config, &PhotoUrlTemplate::default()).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].a, "C1");
        assert_eq!(orders[0].c, "A1");
        assert_eq!(identifier_headers(&table, &config), ["Orden", "Unidad", "Suministro"]);
    }

    #[test]
    fn test_identifier_headers_default() {
        let table = table(vec![]);
        assert_eq!(
            identifier_headers(&table, &OrdersConfig::default()),
            ["Suministro", "Unidad", "Orden"]
        );
    }
}
