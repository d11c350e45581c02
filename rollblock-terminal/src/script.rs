/// Parser for roll scripts such as `"2X+ y- Z+"`
use nom::{
    character::complete::{digit1, multispace0, multispace1, one_of},
    combinator::{all_consuming, map, map_res, opt, verify},
    multi::separated_list0,
    sequence::{delimited, tuple},
    IResult,
};
use rollblock_core::{Sign, WorldAxis};
use std::fmt;

/// Largest repeat count accepted on a single token.
pub const MAX_REPEAT: usize = 1000;

/// Largest number of moves a whole script may expand to.
pub const MAX_MOVES: usize = 10_000;

/// A single roll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub axis: WorldAxis,
    pub sign: Sign,
}

impl Move {
    pub fn new(axis: WorldAxis, sign: Sign) -> Self {
        Self { axis, sign }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Positive => '+',
            Sign::Negative => '-',
        };
        write!(f, "{}{}", self.axis, sign)
    }
}

/// Parse whitespace separated moves, expanding repeat counts.
pub fn parse_script(input: &str) -> Result<Vec<Move>, String> {
    match parse_script_impl(input) {
        Ok((_, groups)) => {
            let total = groups
                .iter()
                .try_fold(0usize, |total, (count, _)| total.checked_add(*count))
                .filter(|total| *total <= MAX_MOVES)
                .ok_or_else(|| format!("move script expands to more than {MAX_MOVES} moves"))?;
            let mut moves = Vec::with_capacity(total);
            for (count, step) in groups {
                moves.extend(std::iter::repeat(step).take(count));
            }
            Ok(moves)
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(format!("unexpected input in move script at {:?}", e.input))
        }
        Err(e) => Err(format!("failed to parse move script: {:?}", e)),
    }
}

fn parse_script_impl(input: &str) -> IResult<&str, Vec<(usize, Move)>> {
    all_consuming(delimited(
        multispace0,
        separated_list0(multispace1, parse_token),
        multispace0,
    ))(input)
}

fn parse_token(input: &str) -> IResult<&str, (usize, Move)> {
    let (input, count) = opt(parse_count)(input)?;
    let (input, step) = parse_move(input)?;
    Ok((input, (count.unwrap_or(1), step)))
}

fn parse_count(input: &str) -> IResult<&str, usize> {
    verify(map_res(digit1, str::parse::<usize>), |count| {
        (1..=MAX_REPEAT).contains(count)
    })(input)
}

fn parse_move(input: &str) -> IResult<&str, Move> {
    map(tuple((one_of("xyzXYZ"), one_of("+-"))), |(axis, sign)| {
        let axis = match axis.to_ascii_lowercase() {
            'x' => WorldAxis::X,
            'y' => WorldAxis::Y,
            _ => WorldAxis::Z,
        };
        let sign = if sign == '+' {
            Sign::Positive
        } else {
            Sign::Negative
        };
        Move::new(axis, sign)
    })(input)
}
