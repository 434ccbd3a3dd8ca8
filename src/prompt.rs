//! Interactive collection of distributor rules from an operator.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::TerritoryError;
use crate::loader::{split_regions, validate_name};
use crate::types::DistributorRequest;

/// Ask for one distributor: a name, then the INCLUDE and EXCLUDE lists.
pub fn read_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<DistributorRequest, TerritoryError> {
    writeln!(output, "Please enter Distributor Name:")?;
    let name = read_line(input, "distributor name")?;
    validate_name(&name).map_err(|_| {
        TerritoryError::Input(format!(
            "distributor name must be a single token, got '{name}'"
        ))
    })?;

    writeln!(output, "Permissions for {name}")?;
    writeln!(output, "INCLUDE:")?;
    let include = split_regions(&read_line(input, "INCLUDE list")?);
    writeln!(output, "EXCLUDE:")?;
    let exclude = split_regions(&read_line(input, "EXCLUDE list")?);

    debug!(
        event = "Prompt",
        phase = "Read",
        distributor = name.as_str(),
        include = ?include,
        exclude = ?exclude
    );

    Ok(DistributorRequest {
        name,
        include,
        exclude,
        parent: None,
    })
}

/// Ask for `count` distributors, each delegated under the one before it.
pub fn read_chain<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    count: usize,
) -> Result<Vec<DistributorRequest>, TerritoryError> {
    let mut requests: Vec<DistributorRequest> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut request = read_request(input, output)?;
        request.parent = requests.last().map(|parent| parent.name.clone());
        requests.push(request);
    }
    Ok(requests)
}

fn read_line<R: BufRead>(input: &mut R, what: &str) -> Result<String, TerritoryError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(TerritoryError::Input(format!(
            "unexpected end of input while reading {what}"
        )));
    }
    Ok(line.trim().to_string())
}
