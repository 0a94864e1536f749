// AirSwap v2 interfaces, reduced to the calls this crate decodes or makes.
// https://github.com/airswap/airswap-protocols/tree/master/source
use alloy::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Party {
        bytes4 kind;
        address wallet;
        address token;
        uint256 amount;
        uint256 id;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Signature {
        address signatory;
        address validator;
        bytes1 version;
        uint8 v;
        bytes32 r;
        bytes32 s;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Order {
        uint256 nonce;
        uint256 expiry;
        Party signer;
        Party sender;
        Party affiliate;
        Signature signature;
    }

    interface ISwap {
        function swap(Order calldata order) external;
        function signerNonceStatus(address signer, uint256 nonce) external view returns (bytes1);
        function signerMinimumNonce(address signer) external view returns (uint256);
    }

    interface IWrapper {
        function swap(Order calldata order) external payable;
        function provideDelegateOrder(Order calldata order, address delegate) external payable;
    }

    interface IDelegate {
        function provideOrder(Order calldata order) external;
    }

    // PreSwapChecker
    interface IValidator {
        function checkSwap(Order calldata order) external view returns (uint256, bytes32[] memory);
        function checkWrappedSwap(Order calldata order, address fromAddress, address wrapper) external view returns (uint256, bytes32[] memory);
        function checkDelegate(Order calldata order, address delegate) external view returns (uint256, bytes32[] memory);
        function checkWrappedDelegate(Order calldata order, address delegate, address wrapper) external view returns (uint256, bytes32[] memory);
    }

    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
    }

    interface IERC721 {
        function ownerOf(uint256 tokenId) external view returns (address);
        function getApproved(uint256 tokenId) external view returns (address);
        function isApprovedForAll(address owner, address operator) external view returns (bool);
    }

    interface IERC1155 {
        function balanceOf(address account, uint256 id) external view returns (uint256);
        function isApprovedForAll(address account, address operator) external view returns (bool);
    }
}
