//! Ticket token contract binding.

use alloy::sol;

sol! {
    /// Mints a token for `tokenOwner`, keyed by a short ticket string.
    #[sol(rpc)]
    #[derive(Debug)]
    contract TicketToken {
        function createToken(address tokenOwner, bytes32 ticket) public;
    }
}
