//! CSV sink for catalog records.
//!
//! Files start with a UTF-8 byte-order mark so spreadsheet tools pick the
//! right encoding for currency symbols such as `£`.

use crate::catalog::Book;
use crate::error::CrawlError;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// UTF-8 byte-order mark written ahead of the header row.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `books` to `path`, replacing any existing file.
///
/// Returns the number of data rows written.
pub fn write_books<'a, I>(books: I, path: &Path) -> Result<usize, CrawlError>
where
    I: IntoIterator<Item = &'a Book>,
{
    debug!("Writing CSV to {}", path.display());

    let mut file = File::create(path).map_err(|e| CrawlError::write(path, e))?;
    file.write_all(UTF8_BOM).map_err(|e| CrawlError::write(path, e))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(BufWriter::new(file));
    writer.write_record(Book::HEADERS).map_err(|e| CrawlError::write(path, e))?;

    let mut count = 0;
    for book in books {
        writer.serialize(book).map_err(|e| CrawlError::write(path, e))?;
        count += 1;
    }

    writer.flush().map_err(|e| CrawlError::write(path, e))?;

    info!("Wrote {} books to {}", count, path.display());
    Ok(count)
}

/// Reads books back from a CSV written by [`write_books`].
///
/// The byte-order mark is optional. Missing columns read as empty strings.
pub fn read_books(path: &Path) -> Result<Vec<Book>, CrawlError> {
    debug!("Reading CSV from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| CrawlError::read(path, e))?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers().map_err(|e| CrawlError::read(path, e))?.clone();

    let mut books = Vec::new();
    for result in reader.records() {
        let mut record = result.map_err(|e| CrawlError::read(path, e))?;
        // Short rows are padded so trailing columns read as empty strings
        while record.len() < headers.len() {
            record.push_field("");
        }
        let book = record.deserialize::<Book>(Some(&headers)).map_err(|e| CrawlError::read(path, e))?;
        books.push(book);
    }

    debug!("Read {} books from {}", books.len(), path.display());
    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "Book Title,Book Price,Instock Availability,Rating,Image URL";

    fn make_book(title: &str) -> Book {
        Book {
            title: title.to_string(),
            price: "£51.77".to_string(),
            availability: "In stock (22 available)".to_string(),
            rating: "Three".to_string(),
            image_url: "https://books.example.com/media/a.jpg".to_string(),
        }
    }

    #[test]
    fn test_empty_sequence_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.csv");

        let books: Vec<Book> = Vec::new();
        let count = write_books(&books, &path).unwrap();
        assert_eq!(count, 0);

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        assert_eq!(String::from_utf8(bytes[3..].to_vec()).unwrap(), format!("{}\n", HEADER));
    }

    #[test]
    fn test_rows_follow_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.csv");

        let books = vec![make_book("A Light in the Attic"), make_book("Tipping the Velvet")];
        assert_eq!(write_books(&books, &path).unwrap(), 2);

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.trim_start_matches('\u{feff}').lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "A Light in the Attic,£51.77,In stock (22 available),Three,https://books.example.com/media/a.jpg"
        );
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.csv");

        let book = Book { title: "Sapiens: A Brief History, Vol. 1".to_string(), ..make_book("") };
        write_books(std::slice::from_ref(&book), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Sapiens: A Brief History, Vol. 1\",£51.77"));
    }

    #[test]
    fn test_second_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.csv");

        write_books(&[make_book("First"), make_book("Second")], &path).unwrap();
        write_books(&[make_book("Third")], &path).unwrap();

        let books = read_books(&path).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Third");
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("books.csv");

        let err = write_books(&[make_book("A")], &path).unwrap_err();
        assert!(matches!(err, CrawlError::Write { .. }));
        assert!(err.to_string().contains("books.csv"));
    }

    #[test]
    fn test_read_back_preserves_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.csv");

        let books = vec![make_book("A"), Book { title: "B".to_string(), ..Book::default() }];
        write_books(&books, &path).unwrap();

        assert_eq!(read_books(&path).unwrap(), books);
    }

    #[test]
    fn test_read_without_bom_and_missing_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.csv");
        fs::write(&path, " Book Title , Book Price\nDune,£9.99\nEmma\n").unwrap();

        let books = read_books(&path).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].price, "£9.99");
        assert_eq!(books[0].rating, "");
        assert_eq!(books[1].title, "Emma");
        assert_eq!(books[1].price, "");
    }

    #[test]
    fn test_read_short_row_in_full_width_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(
            &path,
            format!("\u{feff}{}\nDune,£9.99,In stock,Four,https://books.example.com/d.jpg\nEmma,£3.50\n", HEADER),
        )
        .unwrap();

        let books = read_books(&path).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].rating, "Four");
        assert_eq!(books[1].title, "Emma");
        assert_eq!(books[1].price, "£3.50");
        assert_eq!(books[1].availability, "");
        assert_eq!(books[1].image_url, "");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_books(Path::new("/nonexistent/books.csv")).unwrap_err();
        assert!(matches!(err, CrawlError::Read { .. }));
    }
}
