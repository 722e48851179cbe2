//! Executing requests against whatever owns the sheets.

use range_codec::{CellRange, RangeData, RangeError, Sheet};

use crate::{Command, Request, Response, ResponseData, SheetRef};

/// Something that can hand out ranges of its sheets for reading and writing.
pub trait RangeHost {
    /// Resolve a sheet reference and cell range to a live range.
    fn resolve(
        &mut self,
        sheet: &SheetRef,
        range: &CellRange,
    ) -> Result<Box<dyn RangeData + '_>, RangeError>;
}

/// Execute one request. Every failure becomes an `error` response.
pub fn handle_request<H: RangeHost + ?Sized>(host: &mut H, request: &Request) -> Response {
    let id = request.id;

    let result = match &request.command {
        Command::ReadRange { sheet, range } => with_range(host, sheet, range, |target| {
            let encoded = target.read_encoded()?;
            Ok(Some(ResponseData::Range { encoded }))
        }),
        Command::WriteRange { sheet, range, data } => {
            with_range(host, sheet, range, |target| {
                target.write_encoded(data)?;
                Ok(None)
            })
        }
        Command::Dimensions { sheet, range } => with_range(host, sheet, range, |target| {
            let (rows, cols) = target.dimensions();
            Ok(Some(ResponseData::Dimensions { rows, cols }))
        }),
        Command::Shutdown => Ok(None),
    };

    match result {
        Ok(data) => {
            tracing::trace!("request {id} ok");
            Response::ok(id, data)
        }
        Err(e) => {
            tracing::debug!("request {id} failed: {e}");
            Response::error(id, e.to_string())
        }
    }
}

fn with_range<H, F>(
    host: &mut H,
    sheet: &SheetRef,
    range: &str,
    f: F,
) -> Result<Option<ResponseData>, RangeError>
where
    H: RangeHost + ?Sized,
    F: FnOnce(&mut dyn RangeData) -> Result<Option<ResponseData>, RangeError>,
{
    let range = CellRange::parse(range)?;
    let mut target = host.resolve(sheet, &range)?;
    f(&mut *target)
}

/// A host holding in-memory sheets.
#[derive(Debug, Default)]
pub struct SheetHost {
    sheets: Vec<Sheet>,
}

impl SheetHost {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn into_sheets(self) -> Vec<Sheet> {
        self.sheets
    }

    /// Find a sheet by 0-based index or by name
    pub fn sheet(&self, sheet: &SheetRef) -> Option<&Sheet> {
        self.position(sheet).map(|i| &self.sheets[i])
    }

    fn position(&self, sheet: &SheetRef) -> Option<usize> {
        match sheet {
            SheetRef::Index(i) => Some(*i as usize).filter(|&i| i < self.sheets.len()),
            SheetRef::Name(name) => self.sheets.iter().position(|s| s.name() == name),
        }
    }
}

impl RangeHost for SheetHost {
    fn resolve(
        &mut self,
        sheet: &SheetRef,
        range: &CellRange,
    ) -> Result<Box<dyn RangeData + '_>, RangeError> {
        let index = self
            .position(sheet)
            .ok_or_else(|| RangeError::SheetNotFound(sheet.to_string()))?;
        Ok(Box::new(self.sheets[index].range_mut(*range)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResponseResult;

    fn host() -> SheetHost {
        let mut sheet = Sheet::new("Data");
        sheet.set("A1", "x").unwrap();
        SheetHost::new(vec![sheet])
    }

    #[test]
    fn test_sheet_lookup() {
        let host = host();
        assert!(host.sheet(&SheetRef::Index(0)).is_some());
        assert!(host.sheet(&SheetRef::Name("Data".into())).is_some());
        assert!(host.sheet(&SheetRef::Index(1)).is_none());
        assert!(host.sheet(&SheetRef::Name("Other".into())).is_none());
    }

    #[test]
    fn test_unknown_sheet_is_error_response() {
        let mut host = host();
        let request = Request {
            id: 9,
            command: Command::ReadRange {
                sheet: SheetRef::Name("Missing".into()),
                range: "A1".into(),
            },
        };
        let response = handle_request(&mut host, &request);
        assert_eq!(response.id, 9);
        assert_eq!(
            response.result,
            ResponseResult::Error {
                message: "Sheet not found: Missing".into()
            }
        );
    }

    #[test]
    fn test_bad_range_is_error_response() {
        let mut host = host();
        let request = Request {
            id: 1,
            command: Command::Dimensions {
                sheet: SheetRef::Index(0),
                range: "A0:B2".into(),
            },
        };
        assert!(!handle_request(&mut host, &request).is_ok());
    }
}
