//! Text rendering of the controller state.

use std::fmt;

use catalog_core::{CatalogController, Product, ProductForm, Transport};

const EMPTY_LIST: &str = "Nenhum produto encontrado.";

/// One full redraw: status line, form and product table.
pub struct Screen<'a> {
    pub status: &'a str,
    pub editing: Option<&'a Product>,
    pub form: &'a ProductForm,
    pub products: &'a [Product],
}

pub fn render<T: Transport>(controller: &CatalogController<T>) -> Screen<'_> {
    Screen {
        status: controller.status(),
        editing: controller.editing(),
        form: controller.form(),
        products: controller.products(),
    }
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Gestão de Produtos ==")?;
        if !self.status.is_empty() {
            writeln!(f, "» {}", self.status)?;
        }

        writeln!(f)?;
        match self.editing {
            Some(product) => writeln!(f, "-- Atualizar Produto (id {}) --", product.id)?,
            None => writeln!(f, "-- Novo Produto --")?,
        }
        writeln!(f, "  Nome:      {}", self.form.name)?;
        writeln!(f, "  Categoria: {}", self.form.category)?;
        writeln!(f, "  Preço:     {}", self.form.price)?;

        writeln!(f)?;
        writeln!(f, "-- Lista de Produtos --")?;
        if self.products.is_empty() {
            writeln!(f, "{EMPTY_LIST}")
        } else {
            write!(f, "{}", Table(self.products))
        }
    }
}

/// Aligned `Nome | Categoria | Preço | Id` columns.
struct Table<'a>(&'a [Product]);

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 4]> = self
            .0
            .iter()
            .map(|p| {
                [
                    p.name.clone(),
                    p.category.clone(),
                    format!("R$ {:.2}", p.price),
                    p.id.to_string(),
                ]
            })
            .collect();

        let header = ["Nome", "Categoria", "Preço", "Id"].map(str::to_string);
        let mut widths = header.each_ref().map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for row in std::iter::once(&header).chain(&rows) {
            let cells: Vec<String> = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| pad(cell, width))
                .collect();
            writeln!(f, "  {}", cells.join(" | ").trim_end())?;
        }
        Ok(())
    }
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    format!("{cell}{}", " ".repeat(fill))
}
