#![feature(test)]

extern crate test;

use chumsky::Parser;
use dicebag::{dice::roller::FastRand, parse, Dice};
use test::Bencher;

#[bench]
fn parse_basic(b: &mut Bencher) {
	let parser = dicebag::parser();
	b.iter(|| parser.parse("4d8+4").unwrap());
}

#[bench]
fn parse_shorthand(b: &mut Bencher) {
	let parser = dicebag::parser();
	b.iter(|| parser.parse("d20").unwrap());
}

#[bench]
fn parse_from_str(b: &mut Bencher) {
	b.iter(|| " 3D8-2 ".parse::<Dice>().unwrap());
}

#[bench]
fn parser_creation(b: &mut Bencher) {
	b.iter(dicebag::parser);
}

#[bench]
fn parse_and_roll(b: &mut Bencher) {
	let mut rng = FastRand::default();
	b.iter(|| parse::roll(&mut rng, "2d6+3").unwrap());
}
